use tracing::{debug, trace};

use super::cursor_controller::{InputCaptureController, PlatformCursorAdapter, ViewportGeometry};
use super::input::{InputEvent, InputProcessor, KeyBindings};
use super::motion::{MotionIntegrator, MotionSettings};
use super::pause::{PauseCoordinator, RunState};
use crate::model::{BodyState, CursorState, SimulationClock, DEFAULT_TICK_RATE_HZ};
use crate::utils::{Point, Rect};

/// Everything tunable about a control session
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSettings {
    pub motion: MotionSettings,
    pub bindings: KeyBindings,
    pub tick_rate_hz: u32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            motion: MotionSettings::default(),
            bindings: KeyBindings::default(),
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
        }
    }
}

/// Routes raw input and clock ticks to the capture controller, motion
/// integrator and pause coordinator.
///
/// Holds the single instance of each; the platform cursor and viewport are
/// injected so tests can substitute fakes. All calls happen on the thread
/// that owns the event loop.
pub struct EventDispatcher<P, V> {
    capture: InputCaptureController<P, V>,
    motion: MotionIntegrator,
    pause: PauseCoordinator,
    processor: InputProcessor,
    ticks: u64,
}

impl<P: PlatformCursorAdapter, V: ViewportGeometry> EventDispatcher<P, V> {
    /// Starts Running with the cursor locked
    pub fn new(platform: P, viewport: V, settings: ControlSettings) -> Self {
        Self::with_body(platform, viewport, settings, BodyState::default())
    }

    pub fn with_body(platform: P, viewport: V, settings: ControlSettings, body: BodyState) -> Self {
        let ControlSettings { motion, bindings, tick_rate_hz } = settings;
        Self {
            capture: InputCaptureController::new(platform, viewport),
            motion: MotionIntegrator::with_body(motion, body),
            pause: PauseCoordinator::new(SimulationClock::new(tick_rate_hz)),
            processor: InputProcessor::new(bindings),
            ticks: 0,
        }
    }

    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.key_down(key);
            }
            InputEvent::KeyUp(key) => {
                self.key_up(key);
            }
            InputEvent::MouseMoved(point) => self.mouse_moved(*point),
            InputEvent::Resized(bounds) => self.resized(*bounds),
            InputEvent::Tick => {
                self.tick();
            }
        }
    }

    /// Apply a directional impulse for a bound key. Ignored while paused.
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.pause.is_paused() {
            trace!(key, "key down ignored while paused");
            return false;
        }
        match self.processor.direction_for(key) {
            Some(direction) => {
                self.motion.apply_directional_impulse(direction);
                true
            }
            None => false,
        }
    }

    /// The pause key toggles on release, paused or not
    pub fn key_up(&mut self, key: &str) -> Option<RunState> {
        if !self.processor.is_pause(key) {
            return None;
        }
        let state = self.pause.toggle(&mut self.capture);
        debug!(?state, "pause key toggled");
        Some(state)
    }

    pub fn mouse_moved(&mut self, point: Point) {
        self.capture.on_mouse_moved(point, self.pause.clock(), &mut self.motion);
    }

    pub fn resized(&mut self, bounds: Rect) {
        self.capture.refresh_tracking_region(bounds);
    }

    /// One fixed-rate tick; no-op while paused
    pub fn tick(&mut self) -> bool {
        let applied = self.motion.tick(self.pause.clock());
        if applied {
            self.ticks += 1;
        }
        applied
    }

    /// Menu "continue" action
    pub fn resume(&mut self) -> bool {
        self.pause.resume(&mut self.capture)
    }

    pub fn pause(&mut self) -> bool {
        self.pause.pause(&mut self.capture)
    }

    pub fn on_pause(&mut self, callback: impl FnMut() + 'static) {
        self.pause.on_pause(callback);
    }

    pub fn on_resume(&mut self, callback: impl FnMut(Option<Point>) + 'static) {
        self.pause.on_resume(callback);
    }

    pub fn body(&self) -> BodyState {
        self.motion.body()
    }

    pub fn is_locked(&self) -> bool {
        self.capture.is_locked()
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Overlay cursor is shown only while the simulation runs
    pub fn overlay_cursor_visible(&self) -> bool {
        !self.is_paused()
    }

    pub fn run_state(&self) -> RunState {
        self.pause.state()
    }

    pub fn clock(&self) -> &SimulationClock {
        self.pause.clock()
    }

    pub fn cursor_state(&self) -> CursorState {
        self.capture.state()
    }

    pub fn capture(&self) -> &InputCaptureController<P, V> {
        &self.capture
    }

    /// Ticks that actually advanced the simulation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
