use std::{
    thread,
    time::{Duration, Instant},
};

use upstairs_core::{EngineError, LayoutGenerator, PacingConfig};
use upstairs_system_input::{CommandLatch, KeyInput, NamedKey};
use upstairs_system_pacing::PacingController;
use upstairs_world::{self as world, query, WorldState};

/// Script character standing in for the space bar.
const SPACE_KEY: char = '_';

/// Converts a script into one key press per tick.
///
/// Every character is a key press except `_`, which presses the space bar.
pub(crate) fn parse_script(script: &str) -> Vec<KeyInput> {
    script
        .chars()
        .map(|character| match character {
            SPACE_KEY => KeyInput::named(NamedKey::Space),
            other => KeyInput::character(other),
        })
        .collect()
}

/// Result of a scripted run.
#[derive(Debug)]
pub(crate) struct RunOutcome {
    /// Last accepted world state.
    pub(crate) state: WorldState,
    /// Number of ticks whose command was accepted.
    pub(crate) ticks: usize,
    /// Error that stopped the run early, if any.
    pub(crate) rejection: Option<EngineError>,
}

/// Fixed-cadence loop feeding scripted keys into the world.
pub(crate) struct Driver<G> {
    pacing: PacingController,
    latch: CommandLatch,
    generator: G,
    realtime: bool,
}

impl<G: LayoutGenerator> Driver<G> {
    pub(crate) fn new(pacing: PacingConfig, generator: G, realtime: bool) -> Self {
        Self {
            pacing: PacingController::new(pacing),
            latch: CommandLatch::new(),
            generator,
            realtime,
        }
    }

    /// Runs `ticks` ticks, pressing one scripted key per tick while keys last.
    ///
    /// In realtime mode each tick reports the wall-clock time since the previous
    /// tick; otherwise the recommended wait stands in for it.
    /// A rejected command stops the run and keeps the state from before it.
    pub(crate) fn run(&mut self, state: WorldState, keys: &[KeyInput], ticks: usize) -> RunOutcome {
        let mut state = state;
        let mut virtual_now = Instant::now();
        let mut previous_tick = Instant::now();

        for tick in 0..ticks {
            let elapsed = if self.realtime {
                let wait = self.pacing.next_interval(Instant::now());
                thread::sleep(wait);
                let now = Instant::now();
                let elapsed = now.saturating_duration_since(previous_tick);
                previous_tick = now;
                elapsed
            } else {
                let wait = self.pacing.next_interval(virtual_now);
                virtual_now += wait;
                wait
            };

            if let Some(key) = keys.get(tick) {
                self.latch.press(*key);
            }
            let command = self.latch.take();

            state = match world::apply(state, elapsed, command, &mut self.generator) {
                Ok(next) => next,
                Err(rejection) => {
                    let (previous, error) = rejection.into_parts();
                    log::warn!("tick {tick} rejected {command:?}: {error}");
                    return RunOutcome {
                        state: previous,
                        ticks: tick,
                        rejection: Some(error),
                    };
                }
            };
        }

        log::info!(
            "ran {ticks} ticks, {:?} simulated, match {:?}",
            query::simulated_time(&state),
            query::match_phase(&state)
        );
        RunOutcome {
            state,
            ticks,
            rejection: None,
        }
    }
}

/// Simulated length of a run when every tick is paced at `target`.
#[must_use]
pub(crate) fn planned_duration(target: Duration, ticks: usize) -> Duration {
    target.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
}
