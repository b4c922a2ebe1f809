//! Match clock state machine.

use std::time::Duration;

use upstairs_core::MatchPhase;

/// Tracks whether a timed match is unstarted, running, or finished.
///
/// Timestamps are simulated time, never wall-clock time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchClock {
    window: Duration,
    started_at: Option<Duration>,
    finished: bool,
    floor_number: u32,
}

impl MatchClock {
    /// Creates a clock in the not-started phase.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            started_at: None,
            finished: false,
            floor_number: 1,
        }
    }

    /// Current phase of the clock.
    #[must_use]
    pub const fn phase(&self) -> MatchPhase {
        match (self.started_at, self.finished) {
            (None, _) => MatchPhase::NotStarted,
            (Some(_), false) => MatchPhase::Running,
            (Some(_), true) => MatchPhase::Finished,
        }
    }

    /// Reports whether the match window has elapsed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase(), MatchPhase::Finished)
    }

    /// Simulated time at which the running match started.
    #[must_use]
    pub const fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Floor reached during the current match, starting at one.
    #[must_use]
    pub const fn floor_number(&self) -> u32 {
        self.floor_number
    }

    /// Returns to the not-started phase.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.finished = false;
        self.floor_number = 1;
    }

    /// Resets the clock and starts a new match at `now`.
    pub fn start(&mut self, now: Duration) {
        self.reset();
        self.started_at = Some(now);
    }

    /// Moves a running match to the finished phase.
    ///
    /// Calling it again, or before the match started, changes nothing.
    pub fn finish(&mut self) {
        if self.started_at.is_some() {
            self.finished = true;
        }
    }

    /// Time left in the match window as of `now`, clamped at zero.
    #[must_use]
    pub fn remaining_time(&self, now: Duration) -> Duration {
        match self.started_at {
            None => self.window,
            Some(started_at) => {
                let played = now.saturating_sub(started_at);
                self.window.saturating_sub(played)
            }
        }
    }
}
