//! Tool state machine driven by classified clicks.

use super::gesture::ClickType;
use thiserror::Error;

/// Active annotation behavior.
///
/// `Undo` and `Clear` are one-tick action states: the engine runs the action
/// and falls back to `Pointer` within the same tick. `Failsafe` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolState {
    /// Plain pointer, nothing is drawn
    Pointer,
    /// Freehand stroke in the foreground color
    Draw,
    /// Freehand overpaint in the background color
    Erase,
    /// Straight segment from an anchor to the pointer
    Line,
    /// Remove the last stroke, or restore the last clear
    Undo,
    /// Remove every stroke, keeping a snapshot for one restore
    Clear,
    /// Frozen after an internal fault
    Failsafe,
}

/// A click was presented to a state that has no outgoing click edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("no transition from {from:?} on {click:?}")]
    Unmapped { from: ToolState, click: ClickType },

    #[error("{0:?} cannot be dispatched")]
    NotDispatchable(ToolState),
}

impl ToolState {
    /// Returns true for the tools that build strokes.
    pub fn is_stroke_tool(self) -> bool {
        matches!(self, ToolState::Draw | ToolState::Erase | ToolState::Line)
    }

    /// Upper-case label used in logs and the status line.
    pub fn label(self) -> &'static str {
        match self {
            ToolState::Pointer => "POINTER",
            ToolState::Draw => "DRAW",
            ToolState::Erase => "ERASE",
            ToolState::Line => "LINE",
            ToolState::Undo => "UNDO",
            ToolState::Clear => "CLEAR",
            ToolState::Failsafe => "FAILSAFE",
        }
    }

    /// Next state for `click`.
    ///
    /// The table is position-independent. `ClickType::None` keeps the current
    /// state. `Undo`, `Clear` and `Failsafe` never receive clicks in normal
    /// operation, so a click reaching them is reported instead of ignored.
    pub fn transition(self, click: ClickType) -> Result<ToolState, TransitionError> {
        use ToolState::{Clear, Draw, Erase, Line, Pointer, Undo};

        if click == ClickType::None {
            return Ok(self);
        }

        let next = match (self, click) {
            (Pointer, ClickType::RightSingle) => Draw,
            (Pointer, ClickType::RightDouble) => Line,
            (Pointer, ClickType::LeftSingle) => Erase,

            (Draw, ClickType::RightSingle) => Pointer,
            (Draw, ClickType::RightDouble) => Line,
            (Draw, ClickType::LeftSingle) => Erase,

            (Erase, ClickType::RightSingle) => Draw,
            (Erase, ClickType::RightDouble) => Line,
            (Erase, ClickType::LeftSingle) => Pointer,

            (Line, ClickType::RightSingle) => Pointer,
            (Line, ClickType::RightDouble) => Line,
            (Line, ClickType::LeftSingle) => Erase,

            (Pointer | Draw | Erase | Line, ClickType::LeftDouble) => Undo,
            (Pointer | Draw | Erase | Line, ClickType::LeftLong | ClickType::RightLong) => Clear,

            (from, click) => return Err(TransitionError::Unmapped { from, click }),
        };
        Ok(next)
    }
}
