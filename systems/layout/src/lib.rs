#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded maze generator that fills a fresh floor with walls.
//!
//! The generator topples poles: every interior cell with even row and column
//! indices becomes a wall and knocks one of its open neighbours over. Only the
//! first row of poles may knock upward, which keeps every open cell reachable.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use upstairs_core::{Direction, EngineError, Layout, LayoutCell, LayoutGenerator, Position};

/// Smallest extent that still fits one pole inside the border.
pub const MIN_EXTENT: u32 = 5;

/// Deterministic pole-toppling maze generator.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    rng: ChaCha8Rng,
}

impl MazeGenerator {
    /// Creates a generator whose sequence of layouts is fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl LayoutGenerator for MazeGenerator {
    fn generate(&mut self, rows: u32, columns: u32) -> Result<Layout, EngineError> {
        ensure_extent("rows", rows)?;
        ensure_extent("columns", columns)?;

        let mut layout = Layout::filled(rows, columns, LayoutCell::Empty);
        build_border(&mut layout)?;

        let last_row = to_coordinate(rows)? - 3;
        let last_column = to_coordinate(columns)? - 3;
        for row in (2..=last_row).step_by(2) {
            for column in (2..=last_column).step_by(2) {
                let pole = Position::new(row, column);
                layout.set(pole, LayoutCell::UnbreakableWall)?;

                let candidates: Vec<Position> = Direction::ALL
                    .into_iter()
                    .filter(|direction| row == 2 || *direction != Direction::Up)
                    .map(|direction| pole.offset(direction))
                    .filter(|neighbour| layout.get(*neighbour) == Some(LayoutCell::Empty))
                    .collect();

                if let Some(toppled) = candidates.choose(&mut self.rng) {
                    layout.set(*toppled, LayoutCell::UnbreakableWall)?;
                }
            }
        }

        log::debug!("generated a {rows}x{columns} maze");
        Ok(layout)
    }
}

fn ensure_extent(axis: &str, extent: u32) -> Result<(), EngineError> {
    if extent < MIN_EXTENT || extent % 2 == 0 {
        return Err(EngineError::LayoutGenerationFailed {
            reason: format!("maze {axis} must be odd and at least {MIN_EXTENT}, got {extent}"),
        });
    }
    Ok(())
}

fn to_coordinate(extent: u32) -> Result<i32, EngineError> {
    i32::try_from(extent).map_err(|_| EngineError::LayoutGenerationFailed {
        reason: format!("extent {extent} does not fit a grid coordinate"),
    })
}

fn build_border(layout: &mut Layout) -> Result<(), EngineError> {
    let rows = to_coordinate(layout.rows())?;
    let columns = to_coordinate(layout.columns())?;
    for row in 0..rows {
        for column in 0..columns {
            if row == 0 || row == rows - 1 || column == 0 || column == columns - 1 {
                layout.set(Position::new(row, column), LayoutCell::UnbreakableWall)?;
            }
        }
    }
    Ok(())
}
