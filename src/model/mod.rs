// MODEL: session state, mutated only by the controllers that own it
pub mod body;
pub mod clock;
pub mod cursor;

pub use body::BodyState;
pub use clock::{SimulationClock, DEFAULT_TICK_RATE_HZ};
pub use cursor::CursorState;
