use tracing::info;

use super::cursor_controller::{InputCaptureController, PlatformCursorAdapter, ViewportGeometry};
use crate::model::SimulationClock;
use crate::utils::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Invoked after entering Paused, e.g. to hand keyboard focus to a menu field
pub type PauseCallback = Box<dyn FnMut()>;

/// Invoked after returning to Running with the last known pointer position,
/// e.g. to reposition an overlay cursor
pub type ResumeCallback = Box<dyn FnMut(Option<Point>)>;

/// Single source of truth for whether the simulation runs.
///
/// Every transition moves the clock's `paused` flag and the cursor lock
/// together, so `Running` always means locked with ticks active and `Paused`
/// always means unlocked with ticks inactive.
pub struct PauseCoordinator {
    state: RunState,
    clock: SimulationClock,
    on_pause: Vec<PauseCallback>,
    on_resume: Vec<ResumeCallback>,
}

impl PauseCoordinator {
    pub fn new(clock: SimulationClock) -> Self {
        let mut clock = clock;
        clock.set_paused(false);
        Self {
            state: RunState::Running,
            clock,
            on_pause: Vec::new(),
            on_resume: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn on_pause(&mut self, callback: impl FnMut() + 'static) {
        self.on_pause.push(Box::new(callback));
    }

    pub fn on_resume(&mut self, callback: impl FnMut(Option<Point>) + 'static) {
        self.on_resume.push(Box::new(callback));
    }

    pub fn toggle<P, V>(&mut self, capture: &mut InputCaptureController<P, V>) -> RunState
    where
        P: PlatformCursorAdapter,
        V: ViewportGeometry,
    {
        match self.state {
            RunState::Running => self.pause(capture),
            RunState::Paused => self.resume(capture),
        };
        self.state
    }

    /// Enter Paused. Returns false if already paused.
    pub fn pause<P, V>(&mut self, capture: &mut InputCaptureController<P, V>) -> bool
    where
        P: PlatformCursorAdapter,
        V: ViewportGeometry,
    {
        if self.state == RunState::Paused {
            return false;
        }
        self.state = RunState::Paused;
        self.clock.set_paused(true);
        capture.unlock();
        info!("simulation paused");
        for callback in &mut self.on_pause {
            callback();
        }
        true
    }

    /// Return to Running. Returns false if already running.
    pub fn resume<P, V>(&mut self, capture: &mut InputCaptureController<P, V>) -> bool
    where
        P: PlatformCursorAdapter,
        V: ViewportGeometry,
    {
        if self.state == RunState::Running {
            return false;
        }
        self.state = RunState::Running;
        self.clock.set_paused(false);
        capture.lock();
        info!("simulation resumed");
        let last_pointer = capture.last_pointer();
        for callback in &mut self.on_resume {
            callback(last_pointer);
        }
        true
    }
}
