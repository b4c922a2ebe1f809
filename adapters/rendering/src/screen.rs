//! Bordered character screen that lays out a [`RenderRequest`].

use std::fmt;

use crate::{CellGlyph, Color, RenderRequest};

const FIELD_ORIGIN: (usize, usize) = (2, 2);
const TIME_ORIGIN: (usize, usize) = (3, 25);
const FLOOR_ORIGIN: (usize, usize) = (4, 25);
const RANK_ORIGIN: (usize, usize) = (5, 27);

/// Fixed-size grid of glyphs mirroring a terminal.
///
/// Anything composed past the screen edge is clipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextScreen {
    rows: usize,
    columns: usize,
    cells: Vec<CellGlyph>,
}

impl TextScreen {
    /// Rows of the reference terminal.
    pub const STANDARD_ROWS: usize = 24;
    /// Columns of the reference terminal.
    pub const STANDARD_COLUMNS: usize = 80;

    /// Creates a blank screen of the given size.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![CellGlyph::BLANK; rows * columns],
        }
    }

    /// Creates a blank 24 by 80 screen.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Self::STANDARD_ROWS, Self::STANDARD_COLUMNS)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Glyph at the given screen coordinate.
    #[must_use]
    pub fn glyph(&self, row: usize, column: usize) -> Option<CellGlyph> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Redraws the whole screen from `request`.
    pub fn compose(&mut self, request: &RenderRequest) {
        self.draw_border();

        let (origin_row, origin_column) = FIELD_ORIGIN;
        for row in 0..request.window.rows() {
            for column in 0..request.window.columns() {
                if let Some(glyph) = request.glyph(row, column) {
                    self.put(
                        origin_row + row as usize,
                        origin_column + column as usize,
                        glyph,
                    );
                }
            }
        }

        let time = format!("Time : {:4.1}", request.remaining_seconds());
        self.write_text(TIME_ORIGIN, &time, Color::White);
        let floor = format!("Floor: {:2}", request.floor_number);
        self.write_text(FLOOR_ORIGIN, &floor, Color::White);
        if let Some(rank) = request.rank {
            self.write_text(RANK_ORIGIN, rank.text, rank.color);
        }
    }

    /// Rows of the screen as plain text, without colour.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.columns == 0 {
            return vec![String::new(); self.rows];
        }
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().map(|glyph| glyph.symbol).collect())
            .collect()
    }

    fn draw_border(&mut self) {
        let last_row = self.rows.saturating_sub(1);
        let last_column = self.columns.saturating_sub(1);
        for row in 0..self.rows {
            for column in 0..self.columns {
                let horizontal = row == 0 || row == last_row;
                let vertical = column == 0 || column == last_column;
                let symbol = match (horizontal, vertical) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => ' ',
                };
                self.put(row, column, CellGlyph::new(symbol, Color::White, Color::Black));
            }
        }
    }

    fn write_text(&mut self, (row, column): (usize, usize), text: &str, color: Color) {
        for (offset, symbol) in text.chars().enumerate() {
            self.put(row, column + offset, CellGlyph::new(symbol, color, Color::Black));
        }
    }

    fn put(&mut self, row: usize, column: usize, glyph: CellGlyph) {
        if row < self.rows && column < self.columns {
            self.cells[row * self.columns + column] = glyph;
        }
    }
}

impl Default for TextScreen {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for TextScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
