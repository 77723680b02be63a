use crate::animation::ease::Ease;

/// Fixed-duration interpolation toward a target that can change mid-flight.
///
/// Retargeting starts a fresh transition from wherever the value currently is, so hover
/// flicker never produces a jump.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    ease: Ease,
}

impl Tween {
    /// A tween resting at `value`.
    pub fn settled(value: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: duration,
            duration,
            ease,
        }
    }

    /// Starts a transition to `to`. Retargeting to the current target changes nothing.
    pub fn retarget(&mut self, to: f64) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
    }

    /// Jumps straight to `value`.
    pub fn snap(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.elapsed = self.duration;
    }

    /// Advances by `dt` seconds. Returns whether the transition is still running.
    pub fn tick(&mut self, dt: f64) -> bool {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.is_animating()
    }

    /// Eased value at the current point of the transition.
    pub fn value(&self) -> f64 {
        if !(self.duration > 0.0) || self.elapsed >= self.duration {
            return self.to;
        }
        let t = self.elapsed / self.duration;
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// Value the tween ends on.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Whether the transition still needs ticks.
    pub fn is_animating(&self) -> bool {
        self.duration > 0.0 && self.elapsed < self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
