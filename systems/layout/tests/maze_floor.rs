use std::{collections::VecDeque, time::Duration};

use proptest::prelude::*;
use upstairs_core::{
    ActorClass, EngineConfig, FloorMarker, Layout, LayoutCell, LayoutGenerator, Position,
};
use upstairs_system_layout::MazeGenerator;
use upstairs_world::{self as world, query, WorldState};

fn open_cells_reachable_from(layout: &Layout, start: Position) -> usize {
    let mut seen = vec![start];
    let mut queue = VecDeque::from([start]);
    while let Some(position) = queue.pop_front() {
        for direction in upstairs_core::Direction::ALL {
            let next = position.offset(direction);
            if layout.get(next) == Some(LayoutCell::Empty) && !seen.contains(&next) {
                seen.push(next);
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

#[test]
fn maze_floor_places_avatar_and_exit() {
    let mut generator = MazeGenerator::new(2024);
    let state = WorldState::new(EngineConfig::default());
    let state = world::start_or_restart_match(state, Duration::from_millis(16), &mut generator)
        .expect("default extent is a valid maze");

    assert_eq!(query::avatar_position(&state), Ok(Position::new(1, 1)));
    let grid = query::grid(&state);
    let exit = grid.at(Position::new(11, 19)).expect("exit in bounds");
    assert_eq!(exit.floor_marker(), FloorMarker::Exit);
    assert!(exit.is_unoccupied());

    let corner = grid.occupant_at(Position::new(0, 0)).map(|actor| actor.class());
    assert_eq!(corner, Some(ActorClass::Wall));
}

#[test]
fn even_extent_rejects_the_restart() {
    let mut config = EngineConfig::default();
    config.grid.columns = 20;
    let mut generator = MazeGenerator::new(1);
    let state = WorldState::new(config);

    let (state, error) =
        world::start_or_restart_match(state, Duration::from_millis(16), &mut generator)
            .expect_err("even extent")
            .into_parts();
    assert!(matches!(
        error,
        upstairs_core::EngineError::LayoutGenerationFailed { .. }
    ));
    assert_eq!(query::frame_number(&state), 1);
}

proptest! {
    #[test]
    fn every_open_cell_is_reachable(seed in any::<u64>(), half_rows in 2u32..8, half_columns in 2u32..12) {
        let rows = half_rows * 2 + 1;
        let columns = half_columns * 2 + 1;
        let layout = MazeGenerator::new(seed)
            .generate(rows, columns)
            .expect("odd extents");

        let open = layout
            .iter()
            .filter(|(_, cell)| *cell == LayoutCell::Empty)
            .count();
        prop_assert_eq!(open_cells_reachable_from(&layout, Position::new(1, 1)), open);
    }
}
