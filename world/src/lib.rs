#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Upstairs.
//!
//! The world is a single [`WorldState`] value that the driver loop moves into
//! one reducer per tick. Reducers either return the next state or a
//! [`Rejection`] carrying the previous state untouched, so a failed command
//! never costs the caller its world.

use std::time::Duration;

use upstairs_core::{Command, EngineError, LayoutGenerator};

mod actor;
mod clock;
mod grid;
mod reducers;
mod state;
#[cfg(test)]
mod test_support;

pub use actor::{Actor, ActorId, STRIKE_DURATION_FRAMES};
pub use clock::MatchClock;
pub use grid::{Cell, Grid};
pub use reducers::{advance_time, avatar_acts, move_avatar, start_or_restart_match};
pub use state::WorldState;

/// Failure of a reducer, handing back the state it was given.
#[derive(Debug, thiserror::Error)]
#[error("command rejected: {error}")]
pub struct Rejection {
    state: Box<WorldState>,
    #[source]
    error: EngineError,
}

impl Rejection {
    pub(crate) fn new(state: WorldState, error: EngineError) -> Self {
        Self {
            state: Box::new(state),
            error,
        }
    }

    /// Error that caused the rejection.
    #[must_use]
    pub fn error(&self) -> &EngineError {
        &self.error
    }

    /// Splits the rejection into the untouched state and the error.
    #[must_use]
    pub fn into_parts(self) -> (WorldState, EngineError) {
        (*self.state, self.error)
    }
}

/// Dispatches `command` to the matching reducer.
pub fn apply<G>(
    state: WorldState,
    elapsed: Duration,
    command: Command,
    generator: &mut G,
) -> Result<WorldState, Rejection>
where
    G: LayoutGenerator + ?Sized,
{
    match command {
        Command::StartOrRestartMatch => start_or_restart_match(state, elapsed, generator),
        Command::MoveAvatar { direction } => move_avatar(state, elapsed, direction),
        Command::AvatarActs => avatar_acts(state, elapsed),
        Command::AdvanceTime => advance_time(state, elapsed),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use upstairs_core::{ActorClass, EngineError, MatchPhase, Position, TimedEffect};

    use super::{Grid, MatchClock, WorldState};

    /// Provides read-only access to the grid.
    #[must_use]
    pub fn grid(state: &WorldState) -> &Grid {
        &state.grid
    }

    /// Provides read-only access to the match clock.
    #[must_use]
    pub fn clock(state: &WorldState) -> &MatchClock {
        &state.clock
    }

    /// Effects still alive after the most recent frame.
    #[must_use]
    pub fn active_effects(state: &WorldState) -> &[TimedEffect] {
        &state.active_effects
    }

    /// Number of the frame the next reducer call will process.
    #[must_use]
    pub fn frame_number(state: &WorldState) -> u64 {
        state.frame_number
    }

    /// Total simulated time accumulated across reducer calls.
    #[must_use]
    pub fn simulated_time(state: &WorldState) -> Duration {
        state.simulated_time
    }

    /// Phase of the match clock.
    #[must_use]
    pub fn match_phase(state: &WorldState) -> MatchPhase {
        state.clock.phase()
    }

    /// Time left in the current match as of the world's simulated time.
    #[must_use]
    pub fn remaining_time(state: &WorldState) -> Duration {
        state.clock.remaining_time(state.simulated_time)
    }

    /// Floor reached during the current match.
    #[must_use]
    pub fn floor_number(state: &WorldState) -> u32 {
        state.clock.floor_number()
    }

    /// Position of the only avatar on the grid.
    pub fn avatar_position(state: &WorldState) -> Result<Position, EngineError> {
        state
            .grid
            .find_sole_occupant_of_class(ActorClass::Avatar)
            .map(|cell| cell.position())
    }
}
