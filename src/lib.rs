// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod utils;

// MVC Architecture; rendering is left to collaborators reading BodyState
pub mod model;
pub mod controller;

#[cfg(feature = "native")]
pub mod cli;
#[cfg(feature = "native")]
pub mod platform;

pub use controller::{ControlSettings, EventDispatcher, InputEvent, RunState};
pub use model::BodyState;
pub use utils::{Point, Rect};
