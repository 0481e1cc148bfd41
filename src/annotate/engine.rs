//! Per-tick stroke construction and dispatch.

use super::history::{History, HistoryError, UndoOutcome};
use super::stroke::{FreehandStroke, LineStroke};
use crate::draw::{ObjectHandle, Point, RenderError, Renderer, StrokeRecord, StrokeStyle};
use crate::input::{ToolState, TransitionError};
use log::debug;
use thiserror::Error;

/// Ink for each stroke tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStyles {
    /// Freehand draw: foreground color
    pub draw: StrokeStyle,
    /// Eraser: background color, wider than the pen
    pub erase: StrokeStyle,
    /// Straight line: foreground color
    pub line: StrokeStyle,
}

/// Fault raised while the engine was dispatching a tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Owns the in-progress strokes and the undo/clear history.
///
/// The engine never owns the renderer; the caller lends it per call so the
/// supervisor can wipe it on failure.
#[derive(Debug)]
pub struct AnnotationEngine {
    styles: ToolStyles,
    draw: FreehandStroke,
    erase: FreehandStroke,
    line: LineStroke,
    history: History,
}

impl AnnotationEngine {
    pub fn new(styles: ToolStyles) -> Self {
        Self {
            styles,
            draw: FreehandStroke::default(),
            erase: FreehandStroke::default(),
            line: LineStroke::default(),
            history: History::new(),
        }
    }

    /// Finalized handles, bottom to top.
    pub fn registry(&self) -> &[ObjectHandle] {
        self.history.registry()
    }

    /// Strokes restorable by the next empty-registry undo.
    pub fn snapshot(&self) -> Option<&[StrokeRecord]> {
        self.history.snapshot()
    }

    /// Points buffered for the live stroke of `tool`.
    pub fn buffered_points(&self, tool: ToolState) -> &[Point] {
        match tool {
            ToolState::Draw => self.draw.points(),
            ToolState::Erase => self.erase.points(),
            _ => &[],
        }
    }

    /// Anchor of the line being placed, if any.
    pub fn line_anchor(&self) -> Option<Point> {
        self.line.anchor()
    }

    /// Returns true while any stroke tool still holds unfinalized state.
    pub fn has_live_stroke(&self) -> bool {
        !(self.draw.is_empty() && self.erase.is_empty() && self.line.is_empty())
    }

    /// Runs one tick for `state` with the pointer at `pointer`.
    ///
    /// Strokes of tools other than `state` are finalized first, then the
    /// state's action runs. Returns the state to keep: `Undo` and `Clear`
    /// fall back to `Pointer`, everything else stays.
    pub fn tick<R: Renderer>(
        &mut self,
        state: ToolState,
        pointer: Point,
        renderer: &mut R,
    ) -> Result<ToolState, EngineError> {
        self.finalize_exited(state);

        match state {
            ToolState::Pointer => {}
            ToolState::Draw => self.draw.advance(pointer, self.styles.draw, renderer)?,
            ToolState::Erase => self.erase.advance(pointer, self.styles.erase, renderer)?,
            ToolState::Line => self.line.advance(pointer, self.styles.line, renderer)?,
            ToolState::Undo => {
                self.undo(renderer)?;
                return Ok(ToolState::Pointer);
            }
            ToolState::Clear => {
                self.clear(renderer)?;
                return Ok(ToolState::Pointer);
            }
            ToolState::Failsafe => return Err(TransitionError::NotDispatchable(state).into()),
        }
        Ok(state)
    }

    /// Commits the stroke of every tool that is no longer active.
    ///
    /// A stroke that only ever buffered one point has no object and is
    /// dropped without touching the registry.
    pub fn finalize_exited(&mut self, state: ToolState) {
        let strokes = [
            (ToolState::Draw, self.draw.is_empty()),
            (ToolState::Erase, self.erase.is_empty()),
            (ToolState::Line, self.line.is_empty()),
        ];
        for (tool, empty) in strokes {
            if tool == state || empty {
                continue;
            }
            let handle = match tool {
                ToolState::Draw => self.draw.take(),
                ToolState::Erase => self.erase.take(),
                _ => self.line.take(),
            };
            match handle {
                Some(handle) => {
                    debug!("Finalized {} stroke {:?}", tool.label(), handle);
                    self.history.push(handle);
                }
                None => debug!("Dropped {} stroke without an object", tool.label()),
            }
        }
    }

    /// Removes the last stroke or restores the last clear.
    pub fn undo<R: Renderer>(&mut self, renderer: &mut R) -> Result<UndoOutcome, HistoryError> {
        self.history.undo(renderer)
    }

    /// Deletes all finalized strokes into a restorable snapshot.
    pub fn clear<R: Renderer>(&mut self, renderer: &mut R) -> Result<usize, HistoryError> {
        self.history.clear(renderer)
    }

    /// Drops all buffers, registry entries and the snapshot without any
    /// renderer call. Used once the renderer has been wiped wholesale.
    pub fn forget_all(&mut self) {
        self.draw.take();
        self.erase.take();
        self.line.take();
        self.history.forget();
    }
}
