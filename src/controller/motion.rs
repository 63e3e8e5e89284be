use glam::DVec2;
use tracing::trace;

use super::input::Direction;
use crate::model::{BodyState, SimulationClock};

pub const ACCELERATION: f64 = 0.5;
pub const DRAG: f64 = 0.98;
pub const LOOK_SENSITIVITY: f64 = 0.001;

/// Tunables for the motion integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// Displacement added per directional key-down
    pub acceleration: f64,
    /// Horizontal damping factor applied every tick
    pub drag: f64,
    pub yaw_sensitivity: f64,
    pub pitch_sensitivity: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            drag: DRAG,
            yaw_sensitivity: LOOK_SENSITIVITY,
            pitch_sensitivity: LOOK_SENSITIVITY,
        }
    }
}

/// Owns the ship's body state and applies look, impulse and drag to it
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    settings: MotionSettings,
    body: BodyState,
}

impl MotionIntegrator {
    pub fn new(settings: MotionSettings) -> Self {
        Self::with_body(settings, BodyState::default())
    }

    pub fn with_body(settings: MotionSettings, body: BodyState) -> Self {
        Self { settings, body }
    }

    /// Snapshot for renderers
    pub fn body(&self) -> BodyState {
        self.body
    }

    /// Rotate by a pointer displacement measured from the tracking center.
    ///
    /// Neither axis is clamped; both accumulate without bound.
    pub fn apply_look_delta(&mut self, delta: DVec2) {
        self.body.yaw -= delta.x * self.settings.yaw_sensitivity;
        self.body.pitch += delta.y * self.settings.pitch_sensitivity;
        trace!(dx = delta.x, dy = delta.y, yaw = self.body.yaw, pitch = self.body.pitch, "look");
    }

    /// Fixed displacement per key event, independent of elapsed time
    pub fn apply_directional_impulse(&mut self, direction: Direction) {
        self.body.position += direction.unit() * self.settings.acceleration;
        trace!(?direction, position = ?self.body.position, "impulse");
    }

    /// Damp horizontal position toward rest. Returns false (and leaves the
    /// body untouched) while the clock is paused.
    pub fn tick(&mut self, clock: &SimulationClock) -> bool {
        if clock.is_paused() {
            return false;
        }
        // Vertical motion is not modeled, so y is never damped
        self.body.position.x *= self.settings.drag;
        self.body.position.z *= self.settings.drag;
        true
    }
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self::new(MotionSettings::default())
    }
}
