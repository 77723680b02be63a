//! Entrance animation for one ring's progress sweep.
//!
//! ```text
//! Idle -> Resetting -> Delayed -> Animating -> Settled
//!            ^            |           |
//!            +---- epoch change ------+
//! ```
//!
//! `Resetting` is transient: the spring is jumped to 0 and the stagger timer scheduled in
//! the same call, after which the animator waits in `Delayed`.

use crate::animation::spring::{Spring, SpringConfig};
use crate::animation::timer::Timeout;

/// Time for every background track to finish expanding before progress starts.
pub const PROGRESS_BASE_DELAY: f64 = 0.6;
/// Extra delay per ring index.
pub const PROGRESS_STAGGER: f64 = 0.1;

/// Seconds between (re)mount and the start of ring `index`'s progress sweep.
pub fn progress_delay(index: usize) -> f64 {
    PROGRESS_BASE_DELAY + index as f64 * PROGRESS_STAGGER
}

/// Lifecycle of a progress sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ProgressPhase {
    /// Not mounted.
    Idle,
    /// Spring jumped back to 0.
    Resetting,
    /// Waiting out the stagger delay.
    Delayed,
    /// Spring moving toward 1.
    Animating,
    /// Spring at rest on 1; further frames are identical.
    Settled,
}

/// Owns the spring and stagger timer of one ring's progress sweep.
#[derive(Clone, Debug)]
pub struct ProgressAnimator {
    index: usize,
    spring: Spring,
    timer: Option<Timeout>,
    phase: ProgressPhase,
    epoch: Option<u64>,
}

impl ProgressAnimator {
    /// An idle animator for ring `index`; call [`ProgressAnimator::sync`] to start.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            spring: Spring::new(0.0, SpringConfig::PROGRESS),
            timer: None,
            phase: ProgressPhase::Idle,
            epoch: None,
        }
    }

    /// Starts the entrance on first call and replays it whenever `epoch` differs from the
    /// one it last ran for. Returns whether a restart happened.
    pub fn sync(&mut self, epoch: u64) -> bool {
        if self.epoch == Some(epoch) {
            return false;
        }
        self.restart(epoch);
        true
    }

    fn restart(&mut self, epoch: u64) {
        if let Some(timer) = &mut self.timer {
            if timer.cancel() {
                tracing::debug!(index = self.index, "pending progress start cancelled");
            }
        }
        self.spring.jump(0.0);
        self.set_phase(ProgressPhase::Resetting);

        self.epoch = Some(epoch);
        self.timer = Some(Timeout::new(progress_delay(self.index)));
        self.set_phase(ProgressPhase::Delayed);
    }

    /// Advances timers and the spring by `dt` seconds. Returns whether more frames are
    /// needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        match self.phase {
            ProgressPhase::Idle | ProgressPhase::Resetting | ProgressPhase::Settled => false,
            ProgressPhase::Delayed => {
                let fired = self.timer.as_mut().and_then(|t| t.advance(dt));
                let Some(leftover) = fired else {
                    return true;
                };
                tracing::trace!(index = self.index, "progress start timer fired");
                self.spring.animate_to(1.0);
                self.set_phase(ProgressPhase::Animating);
                self.advance_spring(leftover)
            }
            ProgressPhase::Animating => self.advance_spring(dt),
        }
    }

    fn advance_spring(&mut self, dt: f64) -> bool {
        if self.spring.tick(dt) {
            return true;
        }
        self.set_phase(ProgressPhase::Settled);
        false
    }

    /// Cancels any pending start and freezes the spring.
    pub fn unmount(&mut self) {
        if let Some(timer) = &mut self.timer {
            timer.cancel();
        }
        self.timer = None;
        self.spring.stop();
        self.epoch = None;
        self.set_phase(ProgressPhase::Idle);
    }

    fn set_phase(&mut self, phase: ProgressPhase) {
        if self.phase != phase {
            tracing::debug!(index = self.index, from = ?self.phase, to = ?phase, "progress phase");
            self.phase = phase;
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Epoch of the entrance currently running, if mounted.
    pub fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    /// Seconds until the sweep starts, while delayed.
    pub fn pending_delay(&self) -> Option<f64> {
        self.timer
            .as_ref()
            .filter(|t| t.is_pending())
            .map(Timeout::remaining)
    }

    /// Completion fraction in `[0, 1]`, modulo spring overshoot.
    pub fn fraction(&self) -> f64 {
        self.spring.value()
    }

    /// End angle for this frame: `start + (target_end - start) * fraction`.
    pub fn end_angle(&self, start_angle: f64, target_end_angle: f64) -> f64 {
        self.spring
            .map(|v| start_angle + (target_end_angle - start_angle) * v)
    }

    /// The underlying spring, running from 0 to 1.
    pub fn spring(&self) -> &Spring {
        &self.spring
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/progress.rs"]
mod tests;
