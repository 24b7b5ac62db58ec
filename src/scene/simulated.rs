//! A headless scene that moves one object along the waypoint path.

use crate::core::path::WaypointPath;
use crate::core::sampler::{PositionProvider, SceneObject};

/// Fraction of the remaining distance covered each frame.
const TIMELINE_EASE: f64 = 0.2;
/// Remaining distance (in waypoints) treated as arrived.
const ARRIVE_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct SimulatedScene {
    path: WaypointPath,
    object_name: String,
    /// Current fractional waypoint index of the object.
    timeline: f64,
    target: f64,
    /// Cap on timeline travel per frame, in waypoints.
    max_speed: f64,
    /// Waypoints advanced per scroll notch.
    step_per_notch: f64,
}

impl SimulatedScene {
    pub fn new(
        path: WaypointPath,
        object_name: impl Into<String>,
        max_speed: f64,
        step_per_notch: f64,
    ) -> Self {
        Self {
            path,
            object_name: object_name.into(),
            timeline: 0.0,
            target: 0.0,
            max_speed: max_speed.max(0.01),
            step_per_notch,
        }
    }

    pub fn timeline(&self) -> f64 {
        self.timeline
    }

    /// Feed scroll input.  Positive notches move forward along the path.
    pub fn on_scroll(&mut self, notches: f64) {
        self.seek(self.target + notches * self.step_per_notch);
    }

    /// Set the timeline target directly (clamped to the path).
    pub fn seek(&mut self, target: f64) {
        self.target = target.clamp(0.0, self.path.last_index() as f64);
    }

    /// Move the object to `t` at once, without easing.
    pub fn place(&mut self, t: f64) {
        self.seek(t);
        self.timeline = self.target;
    }

    pub fn seek_start(&mut self) {
        self.seek(0.0);
    }

    pub fn seek_end(&mut self) {
        self.seek(self.path.last_index() as f64);
    }

    /// Run one animation frame.
    pub fn advance(&mut self) {
        let remaining = self.target - self.timeline;
        if remaining.abs() < ARRIVE_EPSILON {
            self.timeline = self.target;
            return;
        }
        let step = (remaining * TIMELINE_EASE).clamp(-self.max_speed, self.max_speed);
        self.timeline += step;
    }
}

impl PositionProvider for SimulatedScene {
    fn find_object_by_name(&self, name: &str) -> Option<SceneObject> {
        (name == self.object_name).then(|| SceneObject {
            position: self.path.sample(self.timeline),
        })
    }
}
