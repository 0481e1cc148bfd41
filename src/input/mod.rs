//! Input handling and tool state machine.
//!
//! This module turns raw button timing into discrete clicks and maps clicks
//! onto the active tool. Both halves are pure: they never touch the renderer.

pub mod events;
pub mod gesture;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{ButtonPhase, InputEvent, MouseButton, PointerEvent};
pub use gesture::{ClassifyError, ClickType, GestureClassifier, GestureThresholds};
pub use tool::{ToolState, TransitionError};
