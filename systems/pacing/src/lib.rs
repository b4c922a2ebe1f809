#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame pacing controller that keeps the driver loop near a fixed cadence.
//!
//! The controller only recommends waits. It never sleeps, so callers decide
//! whether the recommendation becomes a real pause or simulated elapsed time.

use std::time::{Duration, Instant};

use upstairs_core::PacingConfig;

/// Recommends how long to wait before the next tick.
///
/// When the previous tick ran long, the next wait shrinks by the overrun so the
/// long-run rate stays on target, but never below the configured floor.
#[derive(Clone, Debug)]
pub struct PacingController {
    target: Duration,
    floor: Duration,
    last_call: Option<Instant>,
}

impl PacingController {
    /// Creates a controller for the supplied timing targets.
    ///
    /// A floor above the target is lowered to the target.
    #[must_use]
    pub fn new(config: PacingConfig) -> Self {
        let target = config.target_interval();
        let floor = config.floor_interval().min(target);
        Self {
            target,
            floor,
            last_call: None,
        }
    }

    /// Ideal interval between ticks.
    #[must_use]
    pub const fn target(&self) -> Duration {
        self.target
    }

    /// Shortest interval the controller recommends.
    #[must_use]
    pub const fn floor(&self) -> Duration {
        self.floor
    }

    /// Records `now` and returns the wait to apply before the next tick.
    pub fn next_interval(&mut self, now: Instant) -> Duration {
        let Some(last_call) = self.last_call.replace(now) else {
            return self.target;
        };

        let actual = now.saturating_duration_since(last_call);
        let next = self
            .target
            .saturating_mul(2)
            .saturating_sub(actual)
            .clamp(self.floor, self.target);
        if next == self.floor {
            log::debug!("tick ran {actual:?}, pacing at the floor interval");
        }
        next
    }
}
