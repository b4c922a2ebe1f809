//! Aggregate world state threaded through every reducer.

use std::time::Duration;

use upstairs_core::{EngineConfig, EngineError, FloorMarker, Position, TimedEffect};

use crate::{actor::Actor, clock::MatchClock, grid::Grid};

/// Complete authoritative snapshot of the simulation at one frame boundary.
#[derive(Clone, Debug)]
pub struct WorldState {
    pub(crate) config: EngineConfig,
    pub(crate) grid: Grid,
    pub(crate) clock: MatchClock,
    pub(crate) active_effects: Vec<TimedEffect>,
    pub(crate) frame_number: u64,
    pub(crate) simulated_time: Duration,
}

impl WorldState {
    /// Creates a world with an empty grid and an unstarted match clock.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            grid: Grid::new(config.grid.rows, config.grid.columns),
            clock: MatchClock::new(config.match_window()),
            active_effects: Vec::new(),
            frame_number: 1,
            simulated_time: Duration::ZERO,
            config,
        }
    }

    /// Creates the attract-screen world shown before the first match.
    ///
    /// The field is enclosed by walls, the avatar stands on the spawn cell and
    /// the exit marker is painted on the exit cell.
    pub fn welcome(config: EngineConfig) -> Result<Self, EngineError> {
        let mut state = Self::new(config);
        let spawn = state.config.spawn;
        let exit = state.config.exit;

        let _ = state.grid.place(spawn, Actor::Avatar)?;
        state.grid.set_floor_marker(exit, FloorMarker::Exit)?;

        let rows = state.grid.rows() as i32;
        let columns = state.grid.columns() as i32;
        for row in 0..rows {
            for column in 0..columns {
                let on_edge = row == 0 || row == rows - 1 || column == 0 || column == columns - 1;
                let position = Position::new(row, column);
                if on_edge && position != spawn {
                    let _ = state.grid.place(position, Actor::Wall)?;
                }
            }
        }

        Ok(state)
    }

    /// Mutable access to the grid, for setup code and tests that stage scenes.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upstairs_core::{ActorClass, MatchPhase};

    #[test]
    fn new_state_starts_on_frame_one() {
        let state = WorldState::new(EngineConfig::default());
        assert_eq!(state.frame_number, 1);
        assert_eq!(state.simulated_time, Duration::ZERO);
        assert_eq!(state.clock.phase(), MatchPhase::NotStarted);
        assert_eq!(state.grid.rows(), 13);
        assert_eq!(state.grid.columns(), 21);
        assert!(state.active_effects.is_empty());
    }

    #[test]
    fn welcome_encloses_the_field_and_places_the_avatar() {
        let state = WorldState::welcome(EngineConfig::default()).expect("default config fits");

        let avatar = state
            .grid
            .find_sole_occupant_of_class(ActorClass::Avatar)
            .expect("one avatar");
        assert_eq!(avatar.position(), Position::new(1, 1));

        assert_eq!(
            state.grid.occupant_at(Position::new(0, 0)),
            Some(&Actor::Wall)
        );
        assert_eq!(
            state.grid.occupant_at(Position::new(12, 20)),
            Some(&Actor::Wall)
        );
        assert!(state.grid.occupant_at(Position::new(6, 10)).is_none());
        assert_eq!(
            state
                .grid
                .at(Position::new(11, 19))
                .map(|cell| cell.floor_marker()),
            Some(FloorMarker::Exit)
        );
    }

    #[test]
    fn welcome_rejects_spawn_outside_the_grid() {
        let config = EngineConfig {
            spawn: Position::new(40, 1),
            ..EngineConfig::default()
        };
        assert_eq!(
            WorldState::welcome(config).unwrap_err(),
            EngineError::OutOfBounds {
                position: Position::new(40, 1)
            }
        );
    }
}
