//! Finalized-stroke registry with undo and clear.
//!
//! The registry is a LIFO stack of the handles currently visible, in
//! creation order. Clear moves every registered stroke into a single
//! snapshot (geometry + style) and deletes the objects. Undo pops the last
//! stroke; only when the registry is empty does it restore the snapshot, as
//! one bulk operation.

use crate::draw::{ObjectHandle, RenderError, Renderer, StrokeRecord};
use log::debug;
use thiserror::Error;

/// Undo or clear could not complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    #[error("clear failed while {stage}: {source}")]
    Clear {
        stage: &'static str,
        #[source]
        source: RenderError,
    },

    #[error("undo failed while {stage}: {source}")]
    Undo {
        stage: &'static str,
        #[source]
        source: RenderError,
    },
}

/// What an undo did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The most recent stroke was deleted
    RemovedStroke(ObjectHandle),
    /// The last clear was reverted, recreating this many strokes
    Restored(usize),
    /// Registry and snapshot were both empty
    Nothing,
}

#[derive(Debug, Default)]
pub struct History {
    registry: Vec<ObjectHandle>,
    snapshot: Option<Vec<StrokeRecord>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalized handles, bottom to top.
    pub fn registry(&self) -> &[ObjectHandle] {
        &self.registry
    }

    /// Strokes captured by the last clear, if still restorable.
    pub fn snapshot(&self) -> Option<&[StrokeRecord]> {
        self.snapshot.as_deref()
    }

    /// Registers a finalized stroke.
    ///
    /// A new stroke after a clear invalidates that clear's snapshot, so an
    /// undo can only ever restore strokes that were cleared last.
    pub fn push(&mut self, handle: ObjectHandle) {
        self.registry.push(handle);
        if let Some(dropped) = self.snapshot.take() {
            debug!(
                "Discarded clear snapshot of {} stroke(s): new stroke finalized",
                dropped.len()
            );
        }
    }

    /// Deletes every registered stroke, keeping one snapshot to restore.
    pub fn clear<R: Renderer>(&mut self, renderer: &mut R) -> Result<usize, HistoryError> {
        self.snapshot = None;

        let records = self
            .registry
            .iter()
            .map(|handle| renderer.geometry_and_style(*handle))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| HistoryError::Clear {
                stage: "capturing strokes",
                source,
            })?;

        for handle in self.registry.drain(..) {
            renderer
                .delete(handle)
                .map_err(|source| HistoryError::Clear {
                    stage: "deleting strokes",
                    source,
                })?;
        }

        let count = records.len();
        if count > 0 {
            self.snapshot = Some(records);
        }
        debug!("Cleared {} stroke(s)", count);
        Ok(count)
    }

    /// Removes the last stroke, or restores the last clear when none remain.
    pub fn undo<R: Renderer>(&mut self, renderer: &mut R) -> Result<UndoOutcome, HistoryError> {
        if let Some(handle) = self.registry.pop() {
            renderer
                .delete(handle)
                .map_err(|source| HistoryError::Undo {
                    stage: "removing the last stroke",
                    source,
                })?;
            debug!("Undo removed stroke {:?}", handle);
            return Ok(UndoOutcome::RemovedStroke(handle));
        }

        let Some(records) = self.snapshot.take() else {
            debug!("Undo with nothing to undo");
            return Ok(UndoOutcome::Nothing);
        };

        for record in &records {
            let handle = renderer
                .create_polyline(&record.points, record.style.color, record.style.width)
                .map_err(|source| HistoryError::Undo {
                    stage: "restoring cleared strokes",
                    source,
                })?;
            self.registry.push(handle);
        }
        debug!("Undo restored {} cleared stroke(s)", records.len());
        Ok(UndoOutcome::Restored(records.len()))
    }

    /// Forgets everything without touching the renderer.
    pub(crate) fn forget(&mut self) {
        self.registry.clear();
        self.snapshot = None;
    }
}
