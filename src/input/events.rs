//! Platform-neutral pointer events.

use crate::draw::Point;
use serde::Deserialize;
use std::time::Duration;

/// Mouse button identification.
///
/// Only the two buttons the gesture vocabulary uses exist here; backends drop
/// anything else before it reaches the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left mouse button (erase / undo side)
    Left,
    /// Right mouse button (draw / line side)
    Right,
}

/// Whether a button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    Press,
    Release,
}

/// One physical button action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub button: MouseButton,
    pub phase: ButtonPhase,
    pub position: Point,
    /// Monotonic time since session start
    pub timestamp: Duration,
}

impl PointerEvent {
    pub fn press(button: MouseButton, position: Point, timestamp: Duration) -> Self {
        Self {
            button,
            phase: ButtonPhase::Press,
            position,
            timestamp,
        }
    }

    pub fn release(button: MouseButton, position: Point, timestamp: Duration) -> Self {
        Self {
            button,
            phase: ButtonPhase::Release,
            position,
            timestamp,
        }
    }
}

/// Everything the platform can deliver to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Button press or release
    Button(PointerEvent),
    /// Pointer moved (no timing semantics)
    Motion(Point),
    /// Operator asked to leave (Escape on a keyboard, or a scripted exit)
    Exit,
}
