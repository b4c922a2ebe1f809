use std::time::Duration;

use proptest::prelude::*;
use upstairs_core::{EngineConfig, Position};
use upstairs_rendering::{project, CellGlyph, Color, TextScreen, WindowSize};
use upstairs_world::{self as world, Actor, WorldState};

proptest! {
    #[test]
    fn avatar_always_sits_at_the_window_centre(row in 0i32..13, column in 0i32..21) {
        let mut state = WorldState::new(EngineConfig::default());
        let _ = state
            .grid_mut()
            .place(Position::new(row, column), Actor::Avatar)
            .expect("in bounds");

        let request = project(&state, WindowSize::REFERENCE).expect("one avatar");
        prop_assert_eq!(
            request.glyph(6, 10),
            Some(CellGlyph::new('@', Color::Magenta, Color::Black))
        );

        let outside = request
            .cells
            .iter()
            .filter(|glyph| **glyph == CellGlyph::BLANK)
            .count();
        let visible_rows = (0..13).filter(|r| (0..13).contains(&(r - 6 + row))).count();
        let visible_columns = (0..21).filter(|c| (0..21).contains(&(c - 10 + column))).count();
        prop_assert_eq!(outside, 13 * 21 - visible_rows * visible_columns);
    }
}

#[test]
fn welcome_screen_shows_the_avatar_and_timer() {
    let state = WorldState::welcome(EngineConfig::default()).expect("default config fits");
    let request = project(&state, WindowSize::REFERENCE).expect("one avatar");

    let mut screen = TextScreen::standard();
    screen.compose(&request);
    let lines = screen.lines();

    assert_eq!(&lines[8][12..13], "@");
    assert_eq!(&lines[7][11..14], "###");
    assert_eq!(&lines[3][25..36], "Time : 30.0");
    assert_eq!(&lines[4][25..34], "Floor:  1");
}

#[test]
fn finished_match_shows_the_rank() {
    let state = WorldState::welcome(EngineConfig::default()).expect("default config fits");
    let state = world::advance_time(state, Duration::ZERO).expect("advance never fails");
    let mut generator = OpenFloor;
    let state = world::start_or_restart_match(state, Duration::from_secs(31), &mut generator)
        .expect("open floor fits");
    let state = world::advance_time(state, Duration::from_millis(16)).expect("advance never fails");

    let request = project(&state, WindowSize::REFERENCE).expect("one avatar");
    assert_eq!(request.remaining_time, Duration::ZERO);
    let rank = request.rank.expect("finished match has a rank");
    assert_eq!(rank.text, "No good...");

    let mut screen = TextScreen::standard();
    screen.compose(&request);
    assert_eq!(&screen.lines()[5][27..37], "No good...");
}

struct OpenFloor;

impl upstairs_core::LayoutGenerator for OpenFloor {
    fn generate(
        &mut self,
        rows: u32,
        columns: u32,
    ) -> Result<upstairs_core::Layout, upstairs_core::EngineError> {
        Ok(upstairs_core::Layout::filled(
            rows,
            columns,
            upstairs_core::LayoutCell::Empty,
        ))
    }
}
