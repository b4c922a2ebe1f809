#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Upstairs engine.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! world, and the pure systems around it. Adapters translate player input into
//! [`Command`] values, the world threads its state through one reducer per
//! command, and collaborators such as the layout generator are reached through
//! the traits declared here. Nothing in this crate owns mutable game state.

use std::fmt;

use serde::{Deserialize, Serialize};

mod config;

pub use config::{ConfigError, EngineConfig, GridConfig, PacingConfig};

/// Commands that express every transition the rule engine accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Regenerates the floor layout and (re)starts the match clock.
    StartOrRestartMatch,
    /// Attempts to walk the avatar one cell in the provided direction.
    MoveAvatar {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Lets the avatar perform its strike.
    AvatarActs,
    /// Advances the simulation without any player intent.
    AdvanceTime,
}

/// Cardinal movement directions available to the avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in the order the input table checks them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit `(row, column)` delta associated with the direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
///
/// Components are signed so that neighbours of edge cells (for example the cell
/// north of row zero) remain representable; [`Position::in_bounds`] decides
/// whether a coordinate belongs to a concrete grid.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    row: i32,
    column: i32,
}

impl Position {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Reports whether the coordinate lies within `[0, rows) x [0, columns)`.
    #[must_use]
    pub fn in_bounds(&self, rows: u32, columns: u32) -> bool {
        self.row >= 0
            && self.column >= 0
            && i64::from(self.row) < i64::from(rows)
            && i64::from(self.column) < i64::from(columns)
    }

    /// Returns the neighbouring coordinate one step in `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (row_delta, column_delta) = direction.delta();
        Self {
            row: self.row.saturating_add(row_delta),
            column: self.column.saturating_add(column_delta),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Class tag reported by every actor occupying a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorClass {
    /// Inert, unbreakable wall segment.
    Wall,
    /// The player's alter ego.
    Avatar,
}

impl ActorClass {
    /// Stable lowercase name of the class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Avatar => "avatar",
        }
    }
}

impl fmt::Display for ActorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker painted on the floor of a cell, independent of its occupant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FloorMarker {
    /// Plain floor.
    #[default]
    Bare,
    /// Staircase leading out of the current floor.
    Exit,
}

/// Phase of the match clock state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchPhase {
    /// No match has been started since the last reset.
    NotStarted,
    /// A match is in progress.
    Running,
    /// The match window elapsed.
    Finished,
}

/// Frame-stamped annotation covering one or more cells for a limited time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimedEffect {
    area: Vec<Position>,
    created_at_frame: u64,
    duration: u64,
}

impl TimedEffect {
    /// Creates an effect covering `area`, stamped with the frame that created it.
    #[must_use]
    pub fn new(area: Vec<Position>, created_at_frame: u64, duration: u64) -> Self {
        Self {
            area,
            created_at_frame,
            duration,
        }
    }

    /// Cells covered by the effect. Fragments may lie outside the grid.
    #[must_use]
    pub fn area(&self) -> &[Position] {
        &self.area
    }

    /// Frame number that was current when the effect was created.
    #[must_use]
    pub const fn created_at_frame(&self) -> u64 {
        self.created_at_frame
    }

    /// Number of frames the effect stays alive.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    /// Frames left before the effect expires, saturating at zero.
    #[must_use]
    pub const fn remaining(&self, current_frame: u64) -> u64 {
        self.created_at_frame
            .saturating_add(self.duration)
            .saturating_sub(current_frame)
    }
}

/// Content of a single cell produced by a layout generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutCell {
    /// Walkable floor.
    #[default]
    Empty,
    /// Wall that can never be removed during a match.
    UnbreakableWall,
}

/// Dense row-major matrix of [`LayoutCell`] values describing one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rows: u32,
    columns: u32,
    cells: Vec<LayoutCell>,
}

impl Layout {
    /// Creates a layout where every cell holds `fill`.
    ///
    /// An extent whose cell count overflows `usize` yields an empty `0x0` layout.
    #[must_use]
    pub fn filled(rows: u32, columns: u32, fill: LayoutCell) -> Self {
        let len = usize::try_from(rows)
            .ok()
            .zip(usize::try_from(columns).ok())
            .and_then(|(rows, columns)| rows.checked_mul(columns));
        match len {
            Some(len) => Self {
                rows,
                columns,
                cells: vec![fill; len],
            },
            None => Self {
                rows: 0,
                columns: 0,
                cells: Vec::new(),
            },
        }
    }

    /// Builds a layout from row-major cells, rejecting mismatched lengths.
    pub fn from_cells(
        rows: u32,
        columns: u32,
        cells: Vec<LayoutCell>,
    ) -> Result<Self, EngineError> {
        let expected = u64::from(rows) * u64::from(columns);
        if cells.len() as u64 != expected {
            return Err(EngineError::LayoutGenerationFailed {
                reason: format!(
                    "expected {expected} cells for a {rows}x{columns} layout, received {}",
                    cells.len()
                ),
            });
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Number of rows in the layout.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the layout.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the cell at `position`, or `None` when it lies outside the layout.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<LayoutCell> {
        self.index(position).and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites the cell at `position`.
    pub fn set(&mut self, position: Position, cell: LayoutCell) -> Result<(), EngineError> {
        let slot = self
            .index(position)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(EngineError::OutOfBounds { position })?;
        *slot = cell;
        Ok(())
    }

    /// Iterates over every cell in row-major order together with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, LayoutCell)> + '_ {
        let columns = self.columns.max(1) as usize;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let row = (index / columns) as i32;
            let column = (index % columns) as i32;
            (Position::new(row, column), *cell)
        })
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !position.in_bounds(self.rows, self.columns) {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Collaborator that produces a fresh floor layout on demand.
pub trait LayoutGenerator {
    /// Generates a `rows x columns` layout of walkable and unwalkable cells.
    fn generate(&mut self, rows: u32, columns: u32) -> Result<Layout, EngineError>;
}

/// Errors surfaced by grid operations and reducers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A position fell outside the grid.
    #[error("position {position} lies outside the grid")]
    OutOfBounds {
        /// Offending coordinate.
        position: Position,
    },
    /// The source cell of a relocation holds no occupant.
    #[error("no occupant to move at {position}")]
    OccupantMissing {
        /// Cell that was expected to hold an occupant.
        position: Position,
    },
    /// The destination cell of a relocation is already occupied.
    #[error("destination {position} is already occupied")]
    DestinationOccupied {
        /// Cell that already holds an occupant.
        position: Position,
    },
    /// No occupant of the requested class exists.
    #[error("no {class} exists on the grid")]
    NotFound {
        /// Class that was searched for.
        class: ActorClass,
    },
    /// More than one occupant of the requested class exists.
    #[error("expected a single {class} but found {count}")]
    Ambiguous {
        /// Class that was searched for.
        class: ActorClass,
        /// Number of matching occupants.
        count: usize,
    },
    /// The layout collaborator could not produce a usable layout.
    #[error("layout generation failed: {reason}")]
    LayoutGenerationFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}
