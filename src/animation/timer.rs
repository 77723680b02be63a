/// A one-shot delay advanced by the host's frame loop.
///
/// Cancelling is idempotent: cancelling a timer that already fired (or was already
/// cancelled) does nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeout {
    delay: f64,
    remaining: f64,
    state: TimeoutState,
}

/// Lifecycle of a [`Timeout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutState {
    /// Counting down.
    Pending,
    /// Delay elapsed; the timer fired exactly once.
    Fired,
    /// Cancelled before firing.
    Cancelled,
}

impl Timeout {
    /// Schedules a timer that fires once `delay_secs` have been advanced.
    pub fn new(delay_secs: f64) -> Self {
        let delay = delay_secs.max(0.0);
        Self {
            delay,
            remaining: delay,
            state: TimeoutState::Pending,
        }
    }

    /// Advances the countdown. Returns `Some(leftover)` on the call that fires the timer,
    /// where `leftover` is the part of `dt` past the deadline.
    pub fn advance(&mut self, dt: f64) -> Option<f64> {
        if self.state != TimeoutState::Pending {
            return None;
        }
        let dt = dt.max(0.0);
        if dt < self.remaining {
            self.remaining -= dt;
            return None;
        }
        let leftover = dt - self.remaining;
        self.remaining = 0.0;
        self.state = TimeoutState::Fired;
        Some(leftover)
    }

    /// Cancels a pending timer. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.state != TimeoutState::Pending {
            return false;
        }
        self.state = TimeoutState::Cancelled;
        true
    }

    /// Where the timer is in its lifecycle.
    pub fn state(&self) -> TimeoutState {
        self.state
    }

    /// Still counting down.
    pub fn is_pending(&self) -> bool {
        self.state == TimeoutState::Pending
    }

    /// The delay the timer was scheduled with.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Seconds left before the timer fires.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timer.rs"]
mod tests;
