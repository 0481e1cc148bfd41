//! Stroke construction, finalization and the undo/clear subsystem.
//!
//! [`AnnotationEngine`] is the only component that creates or deletes
//! annotation objects. It is driven once per tick with the current tool
//! state and pointer position.

mod engine;
mod history;
mod stroke;
#[cfg(test)]
mod tests;

pub use engine::{AnnotationEngine, EngineError, ToolStyles};
pub use history::{History, HistoryError, UndoOutcome};
