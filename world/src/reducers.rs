//! Pure transition functions, one per accepted command.
//!
//! Every reducer consumes the current [`WorldState`] and either returns the
//! next state or a [`Rejection`] that hands the untouched state back together
//! with the error. All successful transitions end with the shared per-frame
//! advance step.

use std::time::Duration;

use upstairs_core::{
    ActorClass, Direction, EngineError, FloorMarker, LayoutCell, LayoutGenerator, MatchPhase,
    Position,
};

use crate::{actor::Actor, grid::Grid, state::WorldState, Rejection};

/// Runs only the per-frame advance step.
pub fn advance_time(state: WorldState, elapsed: Duration) -> Result<WorldState, Rejection> {
    Ok(advance(state, elapsed))
}

/// Regenerates the floor, places the avatar and the exit, and restarts the match.
pub fn start_or_restart_match<G>(
    state: WorldState,
    elapsed: Duration,
    generator: &mut G,
) -> Result<WorldState, Rejection>
where
    G: LayoutGenerator + ?Sized,
{
    let rows = state.grid.rows();
    let columns = state.grid.columns();
    let spawn = state.config.spawn;
    let exit = state.config.exit;

    for position in [spawn, exit] {
        if !position.in_bounds(rows, columns) {
            return Err(Rejection::new(state, EngineError::OutOfBounds { position }));
        }
    }

    let mut layout = match generator.generate(rows, columns) {
        Ok(layout) => layout,
        Err(error) => return Err(Rejection::new(state, into_layout_failure(error))),
    };
    if layout.rows() != rows || layout.columns() != columns {
        let error = EngineError::LayoutGenerationFailed {
            reason: format!(
                "generator returned a {}x{} layout for a {rows}x{columns} grid",
                layout.rows(),
                layout.columns()
            ),
        };
        return Err(Rejection::new(state, error));
    }
    for position in [spawn, exit] {
        if let Err(error) = layout.set(position, LayoutCell::Empty) {
            return Err(Rejection::new(state, error));
        }
    }

    // Everything that can fail has been checked against the layout, so the
    // mutations below cannot leave a half-built grid behind.
    let mut next = state;
    if let Err(error) = next.grid.apply_layout(&layout) {
        return Err(Rejection::new(next, error));
    }
    if let Err(error) = place_landmarks(&mut next.grid, spawn, exit) {
        return Err(Rejection::new(next, error));
    }

    next.active_effects.clear();
    next.clock.start(next.simulated_time);
    log::info!(
        "match started at {:?} on frame {}",
        next.simulated_time,
        next.frame_number
    );

    Ok(advance(next, elapsed))
}

/// Walks the avatar one cell in `direction` unless the way is blocked.
///
/// Once the match is finished the state is returned unchanged.
pub fn move_avatar(
    state: WorldState,
    elapsed: Duration,
    direction: Direction,
) -> Result<WorldState, Rejection> {
    if state.clock.phase() == MatchPhase::Finished {
        return Ok(state);
    }

    let lookup = state
        .grid
        .find_sole_occupant_of_class(ActorClass::Avatar)
        .map(|cell| cell.position());
    let from = match lookup {
        Ok(position) => position,
        Err(error) => return Err(Rejection::new(state, error)),
    };
    let to = from.offset(direction);

    let mut next = state;
    let walkable = next.grid.at(to).is_some_and(|cell| cell.is_unoccupied());
    if walkable {
        if let Err(error) = next.grid.move_occupant(from, to) {
            return Err(Rejection::new(next, error));
        }
    } else {
        log::debug!("avatar at {from} blocked moving {direction:?}");
    }

    Ok(advance(next, elapsed))
}

/// Lets the avatar act and records the effects it produces.
///
/// Once the match is finished the state is returned unchanged.
pub fn avatar_acts(state: WorldState, elapsed: Duration) -> Result<WorldState, Rejection> {
    if state.clock.phase() == MatchPhase::Finished {
        return Ok(state);
    }

    let lookup = state
        .grid
        .find_sole_occupant_of_class(ActorClass::Avatar)
        .map(|cell| (cell.position(), cell.occupant()));
    let (position, occupant) = match lookup {
        Ok(found) => found,
        Err(error) => return Err(Rejection::new(state, error)),
    };
    let effects = occupant
        .and_then(|id| state.grid.actor(id))
        .map(|actor| actor.act(state.frame_number, position))
        .unwrap_or_default();

    let mut next = state;
    log::debug!(
        "avatar at {position} produced {} effect(s) on frame {}",
        effects.len(),
        next.frame_number
    );
    next.active_effects.extend(effects);

    Ok(advance(next, elapsed))
}

/// Shared per-frame step that every reducer funnels through.
fn advance(mut state: WorldState, elapsed: Duration) -> WorldState {
    state.grid.clear_effect_projections();

    let frame = state.frame_number;
    let before = state.active_effects.len();
    state.active_effects.retain(|effect| effect.remaining(frame) > 0);
    let purged = before - state.active_effects.len();
    if purged > 0 {
        log::debug!("purged {purged} expired effect(s) on frame {frame}");
    }

    for effect in &state.active_effects {
        state.grid.project_effect(effect);
    }

    if state.clock.phase() == MatchPhase::Running
        && state.clock.remaining_time(state.simulated_time).is_zero()
    {
        state.clock.finish();
        log::info!(
            "match finished on frame {frame} at floor {}",
            state.clock.floor_number()
        );
    }

    state.simulated_time = state.simulated_time.saturating_add(elapsed);
    state.frame_number = state.frame_number.saturating_add(1);
    state
}

fn place_landmarks(grid: &mut Grid, spawn: Position, exit: Position) -> Result<(), EngineError> {
    let _ = grid.place(spawn, Actor::Avatar)?;
    grid.set_floor_marker(exit, FloorMarker::Exit)
}

fn into_layout_failure(error: EngineError) -> EngineError {
    match error {
        EngineError::LayoutGenerationFailed { .. } => error,
        other => EngineError::LayoutGenerationFailed {
            reason: other.to_string(),
        },
    }
}
