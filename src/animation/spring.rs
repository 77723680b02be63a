//! Damped-spring value driver.
//!
//! The host advances a [`Spring`] with [`Spring::tick`] once per frame. Each tick applies the
//! closed-form solution of the damped harmonic oscillator, so the trajectory does not depend
//! on how the elapsed time is split into frames. Not ticking is the same as pausing.

/// Physical parameters of a spring plus its rest thresholds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Restoring force per unit displacement.
    pub stiffness: f64,
    /// Velocity-proportional friction.
    pub damping: f64,
    /// Moving mass.
    pub mass: f64,
    /// Distance from the target below which the spring may settle.
    pub rest_delta: f64,
    /// Speed below which the spring may settle.
    pub rest_speed: f64,
}

impl SpringConfig {
    /// Progress-arc sweep: slow, overdamped, no overshoot.
    pub const PROGRESS: Self = Self {
        stiffness: 60.0,
        damping: 20.0,
        mass: 1.0,
        rest_delta: 0.001,
        rest_speed: 0.01,
    };

    /// Background-track scale-in: quick with a small overshoot.
    pub const TRACK_SCALE: Self = Self {
        stiffness: 200.0,
        damping: 20.0,
        mass: 1.0,
        rest_delta: 0.001,
        rest_speed: 0.01,
    };

    /// Damping ratio; below 1 the spring overshoots its target.
    pub fn damping_ratio(&self) -> f64 {
        let m = self.mass.max(1e-9);
        let k = self.stiffness.max(0.0);
        self.damping.max(0.0) / (2.0 * (k * m).sqrt()).max(1e-9)
    }
}

/// A scalar driven toward a target by [`SpringConfig`] dynamics.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    animating: bool,
}

impl Spring {
    /// A spring resting at `value`.
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
            animating: false,
        }
    }

    /// Sets the value instantly, with zero velocity and no pending motion.
    pub fn jump(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.animating = false;
    }

    /// Starts moving toward `target` from the current value and velocity.
    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
        self.animating = !self.at_rest();
        if !self.animating {
            self.value = target;
            self.velocity = 0.0;
        }
    }

    /// Freezes the spring where it is.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.animating = false;
    }

    /// Advances the simulation by `dt` seconds. Returns whether it is still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.animating || !(dt > 0.0) {
            return self.animating;
        }

        let (x, v) = oscillator_step(self.value - self.target, self.velocity, dt, &self.config);
        self.value = self.target + x;
        self.velocity = v;

        if self.at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
            self.animating = false;
        }
        self.animating
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Derived read of the current value.
    pub fn map<T>(&self, f: impl FnOnce(f64) -> T) -> T {
        f(self.value)
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Value the spring is heading to (or resting at).
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring still needs ticks.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Dynamics and rest thresholds.
    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    fn at_rest(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }
}

/// Displacement and velocity after `t` seconds, starting from displacement `x0` and
/// velocity `v0` relative to the rest position.
fn oscillator_step(x0: f64, v0: f64, t: f64, config: &SpringConfig) -> (f64, f64) {
    let k = config.stiffness.max(0.0);
    let m = config.mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return (x0 + v0 * t, v0);
    }
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        let b = v0 + w0 * x0;
        let x = (x0 + b * t) * e;
        let v = (v0 - w0 * b * t) * e;
        (x, v)
    } else if zeta < 1.0 {
        // Underdamped.
        let a = zeta * w0;
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let b = (v0 + a * x0) / wd;
        let e = (-a * t).exp();
        let (s, c) = (wd * t).sin_cos();
        let x = e * (x0 * c + b * s);
        let v = -a * x + e * wd * (b * c - x0 * s);
        (x, v)
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c1 = (v0 - r2 * x0) / (r1 - r2);
        let c2 = x0 - c1;
        let e1 = (r1 * t).exp();
        let e2 = (r2 * t).exp();
        (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
