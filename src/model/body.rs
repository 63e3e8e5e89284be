use glam::DVec3;

/// Position and orientation of the controlled ship.
///
/// Renderers receive this as a `Copy` snapshot; only the motion integrator
/// writes it. There is no velocity: motion is positional displacement plus
/// per-tick damping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyState {
    pub position: DVec3,
    /// Rotation about the vertical axis, radians, unbounded
    pub yaw: f64,
    /// Rotation about the lateral axis, radians, unbounded
    pub pitch: f64,
}

impl BodyState {
    pub fn at(position: DVec3) -> Self {
        Self { position, ..Self::default() }
    }
}
