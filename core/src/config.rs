//! Construction-time configuration for the rule engine and its driver.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Position;

/// Tunable constants for a single engine instance.
///
/// Every field falls back to the reference game when omitted from a
/// deserialised document, so partial configuration files only override what
/// they name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extent of the playing field.
    pub grid: GridConfig,
    /// Cell the avatar occupies when a match starts.
    pub spawn: Position,
    /// Cell that carries the exit marker.
    pub exit: Position,
    /// Length of a match in simulated milliseconds.
    pub match_window_ms: u64,
    /// Cadence targeted by the driver loop.
    pub pacing: PacingConfig,
}

impl EngineConfig {
    /// Length of a match expressed as a [`Duration`].
    #[must_use]
    pub const fn match_window(&self) -> Duration {
        Duration::from_millis(self.match_window_ms)
    }

    /// Checks that the configured positions fit inside the configured grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridConfig { rows, columns } = self.grid;
        if rows == 0 || columns == 0 {
            return Err(ConfigError::EmptyGrid { rows, columns });
        }
        if !self.spawn.in_bounds(rows, columns) {
            return Err(ConfigError::SpawnOutOfBounds {
                position: self.spawn,
            });
        }
        if !self.exit.in_bounds(rows, columns) {
            return Err(ConfigError::ExitOutOfBounds {
                position: self.exit,
            });
        }
        if self.match_window_ms == 0 {
            return Err(ConfigError::ZeroMatchWindow);
        }
        if self.pacing.target_interval_us == 0 {
            return Err(ConfigError::ZeroTargetInterval);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            spawn: Position::new(1, 1),
            exit: Position::new(11, 19),
            match_window_ms: 30_000,
            pacing: PacingConfig::default(),
        }
    }
}

/// Fixed dimensions of the playing field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of cell rows.
    pub rows: u32,
    /// Number of cell columns.
    pub columns: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 13,
            columns: 21,
        }
    }
}

/// Timing targets consumed by the pacing controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Ideal interval between ticks in microseconds (about 60 Hz by default).
    pub target_interval_us: u64,
    /// Shortest interval the controller may ever recommend, in microseconds.
    pub floor_interval_us: u64,
}

impl PacingConfig {
    /// Ideal interval between ticks.
    #[must_use]
    pub const fn target_interval(&self) -> Duration {
        Duration::from_micros(self.target_interval_us)
    }

    /// Shortest interval the controller may recommend.
    #[must_use]
    pub const fn floor_interval(&self) -> Duration {
        Duration::from_micros(self.floor_interval_us)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            target_interval_us: 16_666,
            floor_interval_us: 8_333,
        }
    }
}

/// Reasons an [`EngineConfig`] may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The grid has no cells.
    #[error("grid must have at least one row and column (got {rows}x{columns})")]
    EmptyGrid {
        /// Configured row count.
        rows: u32,
        /// Configured column count.
        columns: u32,
    },
    /// The spawn position does not fit the grid.
    #[error("spawn position {position} lies outside the grid")]
    SpawnOutOfBounds {
        /// Configured spawn position.
        position: Position,
    },
    /// The exit position does not fit the grid.
    #[error("exit position {position} lies outside the grid")]
    ExitOutOfBounds {
        /// Configured exit position.
        position: Position,
    },
    /// A match would end the moment it starts.
    #[error("match window must be longer than zero")]
    ZeroMatchWindow,
    /// The pacing target would spin the driver loop.
    #[error("pacing target interval must be longer than zero")]
    ZeroTargetInterval,
}
