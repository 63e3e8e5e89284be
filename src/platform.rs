//! winit backend for the cursor capabilities and input translation.

use std::cell::Cell;
use std::sync::Arc;

use tracing::debug;
use winit::dpi::PhysicalPosition;
use winit::error::ExternalError;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::Key;
use winit::window::{CursorGrabMode, Window};

use crate::controller::{CursorError, InputEvent, PlatformCursorAdapter, ViewportGeometry};
use crate::utils::{Point, Rect};

fn external(op: &'static str) -> impl Fn(ExternalError) -> CursorError {
    move |e| match e {
        ExternalError::NotSupported(_) => CursorError::Unsupported(op),
        other => CursorError::Platform(format!("{op}: {other}")),
    }
}

/// Cursor adapter over a winit window.
///
/// Dissociation prefers `CursorGrabMode::Locked`; platforms without it get
/// `Confined`, which keeps the pointer in the window while the warp-to-center
/// provides the unbounded range.
pub struct WinitCursor {
    window: Arc<Window>,
    grab: Cell<CursorGrabMode>,
}

impl WinitCursor {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window, grab: Cell::new(CursorGrabMode::None) }
    }

    /// With a hard lock the OS stops reporting cursor positions, so motion
    /// must come from raw device deltas instead
    pub fn reports_raw_motion(&self) -> bool {
        self.grab.get() == CursorGrabMode::Locked
    }
}

impl PlatformCursorAdapter for WinitCursor {
    fn hide(&self) -> Result<(), CursorError> {
        self.window.set_cursor_visible(false);
        Ok(())
    }

    fn show(&self) -> Result<(), CursorError> {
        self.window.set_cursor_visible(true);
        Ok(())
    }

    fn warp_to(&self, screen_point: Point) -> Result<(), CursorError> {
        self.window
            .set_cursor_position(PhysicalPosition::new(screen_point.x, screen_point.y))
            .map_err(external("warp"))
    }

    fn set_dissociated(&self, dissociated: bool) -> Result<(), CursorError> {
        if !dissociated {
            self.window
                .set_cursor_grab(CursorGrabMode::None)
                .map_err(external("release grab"))?;
            self.grab.set(CursorGrabMode::None);
            return Ok(());
        }
        let mode = match self.window.set_cursor_grab(CursorGrabMode::Locked) {
            Ok(()) => CursorGrabMode::Locked,
            Err(e) => {
                debug!(error = %e, "locked grab unavailable, confining instead");
                self.window
                    .set_cursor_grab(CursorGrabMode::Confined)
                    .map_err(external("grab"))?;
                CursorGrabMode::Confined
            }
        };
        self.grab.set(mode);
        Ok(())
    }
}
/// Viewport geometry of a winit window in physical pixels.
///
/// winit measures from the top-left corner with y growing downward, while
/// view coordinates grow upward so that moving the pointer up pitches up.
/// Screen points handed to `warp_to` are back in winit's window space.
pub struct WinitViewport {
    window: Arc<Window>,
}

impl WinitViewport {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl ViewportGeometry for WinitViewport {
    fn bounds(&self) -> Rect {
        let size = self.window.inner_size();
        Rect::from_size(size.width as f64, size.height as f64)
    }

    fn to_screen(&self, view_point: Point) -> Point {
        flip_y(self.bounds(), view_point)
    }
}

/// Mirror a point across the horizontal midline of `bounds`. The mapping is
/// its own inverse, so it converts window space to view space and back.
pub fn flip_y(bounds: Rect, point: Point) -> Point {
    Point::new(point.x, 2.0 * bounds.center().y - point.y)
}

/// Express a raw device delta (y down) as a view-space sample around `center`
pub fn raw_motion_sample(center: Point, delta: (f64, f64)) -> Point {
    center + Point::new(delta.0, -delta.1)
}

/// Logical key name as used by `KeyBindings` ("w", "Escape", "ArrowUp")
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_string()),
        Key::Named(named) => Some(format!("{named:?}")),
        _ => None,
    }
}

fn key_input(name: String, state: ElementState, is_synthetic: bool) -> Option<InputEvent> {
    // Synthetic presses and releases stand for focus changes, not keystrokes
    if is_synthetic {
        return None;
    }
    // Repeats arrive as further presses and each one is an impulse
    match state {
        ElementState::Pressed => Some(InputEvent::KeyDown(name)),
        ElementState::Released => Some(InputEvent::KeyUp(name)),
    }
}

/// Translate the window events the dispatcher cares about.
///
/// `bounds` is the current viewport, used to bring cursor positions into
/// view space.
pub fn translate_window_event(event: &WindowEvent, bounds: Rect) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, is_synthetic, .. } => {
            key_input(key_name(&event.logical_key)?, event.state, *is_synthetic)
        }
        WindowEvent::CursorMoved { position, .. } => {
            let window_point = Point::new(position.x, position.y);
            Some(InputEvent::MouseMoved(flip_y(bounds, window_point)))
        }
        WindowEvent::Resized(size) => {
            Some(InputEvent::Resized(Rect::from_size(size.width as f64, size.height as f64)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::cursor_controller::fakes::{FixedViewport, RecordingCursor};
    use crate::controller::{ControlSettings, EventDispatcher};
    use winit::dpi::PhysicalSize;
    use winit::event::DeviceId;
    use winit::keyboard::NamedKey;

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            // SAFETY: the id is only compared, never handed back to the backend
            device_id: unsafe { DeviceId::dummy() },
            position: PhysicalPosition::new(x, y),
        }
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(&Key::Character("w".into())), Some("w".to_string()));
        assert_eq!(key_name(&Key::Named(NamedKey::Escape)), Some("Escape".to_string()));
        assert_eq!(key_name(&Key::Named(NamedKey::ArrowUp)), Some("ArrowUp".to_string()));
    }

    #[test]
    fn test_key_state_maps_to_down_and_up() {
        assert_eq!(
            key_input("w".into(), ElementState::Pressed, false),
            Some(InputEvent::KeyDown("w".into()))
        );
        assert_eq!(
            key_input("Escape".into(), ElementState::Released, false),
            Some(InputEvent::KeyUp("Escape".into()))
        );
    }

    #[test]
    fn test_synthetic_keys_are_dropped() {
        // Focus loss releases held keys and focus gain presses them again
        assert_eq!(key_input("Escape".into(), ElementState::Released, true), None);
        assert_eq!(key_input("w".into(), ElementState::Pressed, true), None);
    }

    #[test]
    fn test_cursor_position_is_flipped_into_view_space() {
        let bounds = Rect::from_size(800.0, 600.0);
        assert_eq!(
            translate_window_event(&cursor_moved(400.0, 200.0), bounds),
            Some(InputEvent::MouseMoved(Point::new(400.0, 400.0)))
        );
        assert_eq!(
            translate_window_event(&cursor_moved(10.0, 300.0), bounds),
            Some(InputEvent::MouseMoved(Point::new(10.0, 300.0)))
        );
    }

    #[test]
    fn test_pointer_above_center_pitches_up() {
        let bounds = Rect::from_size(800.0, 600.0);
        let mut d = EventDispatcher::new(
            RecordingCursor::default(),
            FixedViewport::sized(800.0, 600.0),
            ControlSettings::default(),
        );
        let input = translate_window_event(&cursor_moved(400.0, 200.0), bounds).unwrap();
        d.handle(&input);
        assert!((d.body().pitch - 0.1).abs() < 1e-12);
        assert_eq!(d.body().yaw, 0.0);
    }

    #[test]
    fn test_flip_round_trips() {
        let bounds = Rect::from_size(800.0, 600.0);
        let p = Point::new(123.0, 45.0);
        assert_eq!(flip_y(bounds, p), Point::new(123.0, 555.0));
        assert_eq!(flip_y(bounds, flip_y(bounds, p)), p);
        assert_eq!(flip_y(bounds, bounds.center()), bounds.center());
    }

    #[test]
    fn test_raw_motion_sample() {
        let center = Point::new(400.0, 300.0);
        // Device y grows downward, so an upward push is a negative delta
        assert_eq!(raw_motion_sample(center, (30.0, -100.0)), Point::new(430.0, 400.0));
        assert_eq!(raw_motion_sample(center, (0.0, 0.0)), center);

        let mut d = EventDispatcher::new(
            RecordingCursor::default(),
            FixedViewport::sized(800.0, 600.0),
            ControlSettings::default(),
        );
        d.handle(&InputEvent::MouseMoved(raw_motion_sample(center, (0.0, -100.0))));
        assert!((d.body().pitch - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_resize_translation() {
        let event = WindowEvent::Resized(PhysicalSize::new(1280, 720));
        assert_eq!(
            translate_window_event(&event, Rect::from_size(800.0, 600.0)),
            Some(InputEvent::Resized(Rect::from_size(1280.0, 720.0)))
        );
    }

    #[test]
    fn test_unrelated_events_are_dropped() {
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested, Rect::ZERO), None);
    }
}
