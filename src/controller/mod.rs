// CONTROLLER: input capture, motion, pause and the dispatcher that routes between them
pub mod cursor_controller;
pub mod dispatcher;
pub mod input;
pub mod motion;
pub mod pause;
pub mod ticker;

pub use cursor_controller::{
    CursorError, InputCaptureController, PlatformCursorAdapter, ViewportGeometry,
};
pub use dispatcher::{ControlSettings, EventDispatcher};
pub use input::{Direction, InputEvent, InputProcessor, KeyBindings};
pub use motion::{MotionIntegrator, MotionSettings};
pub use pause::{PauseCallback, PauseCoordinator, ResumeCallback, RunState};
pub use ticker::{FixedTicker, DEFAULT_MAX_TICKS_PER_FRAME};
