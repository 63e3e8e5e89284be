//! Pointer capture for mouselook.
//!
//! While locked, the OS pointer is hidden, dissociated from screen motion and
//! warped back to the center of the tracking region after every sample, so
//! each sample's offset from that center is the look delta and the look range
//! is unbounded. The platform side is reached only through
//! [`PlatformCursorAdapter`] and [`ViewportGeometry`], so the state machine
//! runs the same against a real window or a test fake.

use glam::DVec2;
use tracing::{debug, trace, warn};

use super::motion::MotionIntegrator;
use crate::model::{CursorState, SimulationClock};
use crate::utils::{Point, Rect};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CursorError {
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    #[error("platform cursor call failed: {0}")]
    Platform(String),
}

/// OS pointer capabilities. Calls are fire-and-forget from the controller's
/// point of view; failures are logged and recorded, never propagated.
pub trait PlatformCursorAdapter {
    fn hide(&self) -> Result<(), CursorError>;

    fn show(&self) -> Result<(), CursorError>;

    /// Move the OS pointer to a point in screen coordinates
    fn warp_to(&self, screen_point: Point) -> Result<(), CursorError>;

    /// Decouple (or re-couple) pointer motion reporting from its on-screen position
    fn set_dissociated(&self, dissociated: bool) -> Result<(), CursorError>;
}

/// Viewport geometry provider
pub trait ViewportGeometry {
    /// Current bounds in view-local coordinates
    fn bounds(&self) -> Rect;

    /// Convert a view-local point to the screen space `warp_to` expects
    fn to_screen(&self, view_point: Point) -> Point;
}

/// Two-state (Locked / Unlocked) pointer capture controller
pub struct InputCaptureController<P, V> {
    platform: P,
    viewport: V,
    state: CursorState,
    last_pointer: Option<Point>,
    platform_failures: u64,
    last_platform_error: Option<CursorError>,
}

impl<P: PlatformCursorAdapter, V: ViewportGeometry> InputCaptureController<P, V> {
    /// Start in the Locked state, tracking the viewport's current bounds
    pub fn new(platform: P, viewport: V) -> Self {
        let tracking_region = viewport.bounds();
        let mut controller = Self {
            platform,
            viewport,
            state: CursorState { locked: false, tracking_region },
            last_pointer: None,
            platform_failures: 0,
            last_platform_error: None,
        };
        controller.lock();
        controller
    }

    /// Hide, center and dissociate the pointer. Idempotent.
    pub fn lock(&mut self) {
        if self.state.locked {
            trace!("lock: already locked");
            return;
        }
        let hidden = self.platform.hide();
        self.report("hide", hidden);
        self.warp_to_center();
        let dissociated = self.platform.set_dissociated(true);
        self.report("dissociate", dissociated);
        self.state.locked = true;
        debug!("cursor locked");
    }

    /// Show the pointer and re-associate it with screen motion. Idempotent.
    pub fn unlock(&mut self) {
        if !self.state.locked {
            trace!("unlock: already unlocked");
            return;
        }
        let shown = self.platform.show();
        self.report("show", shown);
        let associated = self.platform.set_dissociated(false);
        self.report("associate", associated);
        self.state.locked = false;
        debug!("cursor unlocked");
    }

    /// Must follow every resize or relayout, otherwise deltas are measured
    /// from a stale center.
    pub fn refresh_tracking_region(&mut self, bounds: Rect) {
        debug!(width = bounds.width(), height = bounds.height(), "tracking region refreshed");
        self.state.tracking_region = bounds;
    }

    /// Process one raw pointer sample in view-local coordinates.
    ///
    /// Ignored while paused. Otherwise the offset from the tracking center is
    /// forwarded to `motion` as a look delta and returned; when locked the
    /// pointer is then warped back to the center.
    pub fn on_mouse_moved(
        &mut self,
        raw: Point,
        clock: &SimulationClock,
        motion: &mut MotionIntegrator,
    ) -> Option<DVec2> {
        if clock.is_paused() {
            return None;
        }
        let delta = raw - self.state.tracking_region.center();
        motion.apply_look_delta(delta);
        self.last_pointer = Some(raw);
        if self.state.locked {
            self.warp_to_center();
        }
        Some(delta)
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Last processed pointer sample, used to re-sync overlay cursors on resume
    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Number of adapter calls that have failed since construction
    pub fn platform_failures(&self) -> u64 {
        self.platform_failures
    }

    pub fn last_platform_error(&self) -> Option<&CursorError> {
        self.last_platform_error.as_ref()
    }

    fn warp_to_center(&mut self) {
        let region = self.state.tracking_region;
        if region.is_degenerate() {
            trace!(?region, "skipping warp for degenerate tracking region");
            return;
        }
        let target = self.viewport.to_screen(region.center());
        let warped = self.platform.warp_to(target);
        self.report("warp", warped);
    }

    fn report(&mut self, op: &'static str, result: Result<(), CursorError>) {
        if let Err(e) = result {
            warn!(op, error = %e, "cursor adapter call failed");
            self.platform_failures += 1;
            self.last_platform_error = Some(e);
        }
    }
}
