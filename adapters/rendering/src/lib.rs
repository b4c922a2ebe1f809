#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Upstairs adapters.
//!
//! [`project`] turns a world snapshot into a [`RenderRequest`]: a fixed window
//! of glyphs centred on the avatar plus the match read-outs. Adapters receive
//! requests through [`PresentationSink`] and never touch the world directly.

use anyhow::Result as AnyResult;
use std::{error::Error, fmt, time::Duration};
use upstairs_core::{ActorClass, EngineError, FloorMarker, Position};
use upstairs_world::{query, Cell, WorldState};

mod screen;

pub use screen::TextScreen;

/// Terminal palette used when presenting frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black.
    #[default]
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
}

/// Symbol and colours drawn into one character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellGlyph {
    /// Character shown in the cell.
    pub symbol: char,
    /// Colour of the character.
    pub foreground: Color,
    /// Colour behind the character.
    pub background: Color,
}

impl CellGlyph {
    /// Blank cell drawn where the window extends past the grid.
    pub const BLANK: Self = Self::new(' ', Color::White, Color::Black);

    /// Creates a glyph.
    #[must_use]
    pub const fn new(symbol: char, foreground: Color, background: Color) -> Self {
        Self {
            symbol,
            foreground,
            background,
        }
    }

    /// Glyph for a single grid cell.
    #[must_use]
    pub fn for_cell(state: &WorldState, cell: &Cell) -> Self {
        let background = if cell.effects().is_empty() {
            Color::Black
        } else {
            Color::Red
        };

        let occupant = cell
            .occupant()
            .map(|id| query::grid(state).actor(id).map(|actor| actor.class()));
        let (symbol, foreground) = match occupant {
            Some(Some(ActorClass::Avatar)) => ('@', Color::Magenta),
            Some(Some(ActorClass::Wall)) => ('#', Color::Yellow),
            Some(None) => ('?', Color::White),
            None => match cell.floor_marker() {
                FloorMarker::Exit => ('<', Color::Green),
                FloorMarker::Bare => ('.', Color::White),
            },
        };

        Self::new(symbol, foreground, background)
    }
}

/// Extent of the window projected around the avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowSize {
    rows: u32,
    columns: u32,
}

impl WindowSize {
    /// Window used by the reference terminal layout.
    pub const REFERENCE: Self = Self {
        rows: 13,
        columns: 21,
    };

    /// Creates a window size.
    ///
    /// Returns an error when either axis is zero.
    pub fn new(rows: u32, columns: u32) -> Result<Self, RenderingError> {
        if rows == 0 || columns == 0 {
            return Err(RenderingError::EmptyWindow { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    /// Number of glyph rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of glyph columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Window coordinate that shows the avatar.
    #[must_use]
    pub const fn centre(&self) -> Position {
        Position::new(centre_index(self.rows), centre_index(self.columns))
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::REFERENCE
    }
}

const fn centre_index(extent: u32) -> i32 {
    ((extent as i64 + 1) / 2 - 1) as i32
}

/// End-of-match verdict shown next to the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RankMessage {
    /// Text of the verdict.
    pub text: &'static str,
    /// Colour the verdict is drawn in.
    pub color: Color,
}

impl RankMessage {
    /// Verdict for a match that ended on `floor_number`.
    #[must_use]
    pub const fn for_floor(floor_number: u32) -> Self {
        let (text, color) = match floor_number {
            3 => ("Good!", Color::Green),
            4 => ("Excellent!", Color::Green),
            5 => ("Marvelous!", Color::Green),
            6..=u32::MAX => ("Champion!!", Color::Cyan),
            _ => ("No good...", Color::White),
        };
        Self { text, color }
    }
}

/// Everything an adapter needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    /// Extent of the projected window.
    pub window: WindowSize,
    /// Row-major glyphs of the projected window.
    pub cells: Vec<CellGlyph>,
    /// Time left in the match.
    pub remaining_time: Duration,
    /// Floor reached so far.
    pub floor_number: u32,
    /// Verdict, present once the match is finished.
    pub rank: Option<RankMessage>,
}

impl RenderRequest {
    /// Glyph at the given window coordinate.
    #[must_use]
    pub fn glyph(&self, row: u32, column: u32) -> Option<CellGlyph> {
        if row >= self.window.rows || column >= self.window.columns {
            return None;
        }
        let index = usize::try_from(row * self.window.columns + column).ok()?;
        self.cells.get(index).copied()
    }

    /// Remaining time in seconds, as shown on the time read-out.
    #[must_use]
    pub fn remaining_seconds(&self) -> f64 {
        self.remaining_time.as_secs_f64()
    }
}

/// Projects the world into a window of glyphs centred on the avatar.
///
/// Fails when the world does not hold exactly one avatar.
pub fn project(state: &WorldState, window: WindowSize) -> Result<RenderRequest, EngineError> {
    let avatar = query::avatar_position(state)?;
    let centre = window.centre();
    let grid = query::grid(state);

    let mut cells = Vec::with_capacity(window.rows as usize * window.columns as usize);
    for row in 0..window.rows as i32 {
        for column in 0..window.columns as i32 {
            let position = Position::new(
                row - centre.row() + avatar.row(),
                column - centre.column() + avatar.column(),
            );
            let glyph = grid
                .at(position)
                .map_or(CellGlyph::BLANK, |cell| CellGlyph::for_cell(state, cell));
            cells.push(glyph);
        }
    }

    let rank = query::clock(state)
        .is_finished()
        .then(|| RankMessage::for_floor(query::floor_number(state)));

    Ok(RenderRequest {
        window,
        cells,
        remaining_time: query::remaining_time(state),
        floor_number: query::floor_number(state),
        rank,
    })
}

/// Destination for projected frames.
pub trait PresentationSink {
    /// Presents one frame.
    fn present(&mut self, request: &RenderRequest) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Windows need at least one row and one column.
    EmptyWindow {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWindow { rows, columns } => {
                write!(f, "window must not be empty (received {rows}x{columns})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use upstairs_core::EngineConfig;
    use upstairs_world::Actor;

    fn world_with_avatar_at(position: Position) -> WorldState {
        let mut state = WorldState::new(EngineConfig::default());
        let _ = state
            .grid_mut()
            .place(position, Actor::Avatar)
            .expect("avatar fits");
        state
    }

    #[test]
    fn reference_window_centres_on_the_middle_cell() {
        assert_eq!(WindowSize::REFERENCE.centre(), Position::new(6, 10));
        let even = WindowSize::new(4, 6).expect("non-empty");
        assert_eq!(even.centre(), Position::new(1, 2));
        let single = WindowSize::new(1, 1).expect("non-empty");
        assert_eq!(single.centre(), Position::new(0, 0));
    }

    #[test]
    fn empty_window_is_rejected() {
        let error = WindowSize::new(0, 21).expect_err("no rows");
        assert_eq!(
            error,
            RenderingError::EmptyWindow {
                rows: 0,
                columns: 21
            }
        );
        assert_eq!(error.to_string(), "window must not be empty (received 0x21)");
    }

    #[test]
    fn avatar_is_drawn_at_the_window_centre() {
        let state = world_with_avatar_at(Position::new(1, 1));
        let request = project(&state, WindowSize::REFERENCE).expect("one avatar");

        assert_eq!(
            request.glyph(6, 10),
            Some(CellGlyph::new('@', Color::Magenta, Color::Black))
        );
        assert_eq!(request.glyph(5, 9).map(|glyph| glyph.symbol), Some('.'));
        assert_eq!(request.glyph(4, 8), Some(CellGlyph::BLANK));
        assert_eq!(request.glyph(13, 0), None);
    }

    #[test]
    fn walls_exit_and_effects_use_their_glyphs() {
        let mut state = world_with_avatar_at(Position::new(5, 5));
        let _ = state
            .grid_mut()
            .place(Position::new(5, 6), Actor::Wall)
            .expect("wall fits");
        state
            .grid_mut()
            .set_floor_marker(Position::new(6, 5), FloorMarker::Exit)
            .expect("exit fits");
        let state = upstairs_world::avatar_acts(state, Duration::ZERO).expect("avatar present");

        let request = project(&state, WindowSize::REFERENCE).expect("one avatar");
        assert_eq!(
            request.glyph(6, 11),
            Some(CellGlyph::new('#', Color::Yellow, Color::Black))
        );
        assert_eq!(
            request.glyph(7, 10),
            Some(CellGlyph::new('<', Color::Green, Color::Black))
        );
        assert_eq!(
            request.glyph(5, 10),
            Some(CellGlyph::new('.', Color::White, Color::Red))
        );
    }

    #[test]
    fn rank_messages_follow_the_floor_reached() {
        assert_eq!(RankMessage::for_floor(1).text, "No good...");
        assert_eq!(RankMessage::for_floor(2).color, Color::White);
        assert_eq!(RankMessage::for_floor(3).text, "Good!");
        assert_eq!(RankMessage::for_floor(4).text, "Excellent!");
        assert_eq!(RankMessage::for_floor(5).text, "Marvelous!");
        assert_eq!(
            RankMessage::for_floor(9),
            RankMessage {
                text: "Champion!!",
                color: Color::Cyan
            }
        );
    }

    #[test]
    fn rank_is_only_shown_after_the_match() {
        let state = world_with_avatar_at(Position::new(1, 1));
        let request = project(&state, WindowSize::REFERENCE).expect("one avatar");
        assert_eq!(request.rank, None);
        assert_eq!(request.remaining_seconds(), 30.0);
        assert_eq!(request.floor_number, 1);
    }

    #[test]
    fn missing_avatar_fails_the_projection() {
        let state = WorldState::new(EngineConfig::default());
        assert_eq!(
            project(&state, WindowSize::REFERENCE),
            Err(EngineError::NotFound {
                class: ActorClass::Avatar
            })
        );
    }
}
