//! Platform-agnostic input handling

use glam::DVec3;

use crate::utils::{Point, Rect};

/// Platform-independent input events, as delivered to the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard events, keyed by logical key name ("w", "Escape", ...)
    KeyDown(String),
    KeyUp(String),

    /// Pointer position in view-local coordinates
    MouseMoved(Point),

    /// Viewport bounds changed (resize or relayout)
    Resized(Rect),

    /// One fixed-rate clock tick elapsed
    Tick,
}

/// Planar movement directions driven by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    /// Unit vector on the horizontal plane; forward looks down -Z
    pub fn unit(self) -> DVec3 {
        match self {
            Direction::Forward => DVec3::NEG_Z,
            Direction::Back => DVec3::Z,
            Direction::Left => DVec3::NEG_X,
            Direction::Right => DVec3::X,
        }
    }
}

/// Key mapping configuration
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub forward: String,
    pub back: String,
    pub left: String,
    pub right: String,
    pub pause: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            back: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            pause: "Escape".to_string(),
        }
    }
}

/// Resolves raw key names against the bindings
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        let b = &self.bindings;
        if key.eq_ignore_ascii_case(&b.forward) {
            Some(Direction::Forward)
        } else if key.eq_ignore_ascii_case(&b.back) {
            Some(Direction::Back)
        } else if key.eq_ignore_ascii_case(&b.left) {
            Some(Direction::Left)
        } else if key.eq_ignore_ascii_case(&b.right) {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn is_pause(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.bindings.pause)
    }
}
