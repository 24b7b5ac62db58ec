//! Damped spring used to soften raw scroll progress before it reaches the
//! text animations.
//!
//! Integrated with semi-implicit Euler once per frame.  With the default
//! stiffness/damping the spring is overdamped, so it never overshoots.

pub const DEFAULT_STIFFNESS: f64 = 70.0;
pub const DEFAULT_DAMPING: f64 = 30.0;

/// Displacement and speed below which the spring snaps to rest.
const REST_DELTA: f64 = 0.0005;
const REST_SPEED: f64 = 0.0005;
/// Larger steps than this are split so a stalled frame can't explode.
const MAX_STEP_SECS: f64 = 1.0 / 30.0;

#[derive(Debug, Clone)]
pub struct SpringValue {
    stiffness: f64,
    damping: f64,
    value: f64,
    velocity: f64,
    target: f64,
}

impl SpringValue {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the simulation by `dt` seconds and return the new value.
    pub fn tick(&mut self, dt: f64) -> f64 {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let accel = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}

impl Default for SpringValue {
    fn default() -> Self {
        Self::new(DEFAULT_STIFFNESS, DEFAULT_DAMPING)
    }
}
