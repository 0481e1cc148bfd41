//! In-progress stroke buffers.

use crate::draw::{ObjectHandle, Point, RenderError, Renderer, StrokeStyle};

/// Freehand polyline under construction (draw and erase).
///
/// The renderer object is created on the second distinct point and then
/// extended in place, so one stroke is always exactly one object.
#[derive(Debug, Default)]
pub(crate) struct FreehandStroke {
    points: Vec<Point>,
    handle: Option<ObjectHandle>,
}

impl FreehandStroke {
    pub(crate) fn is_empty(&self) -> bool {
        self.points.is_empty() && self.handle.is_none()
    }

    pub(crate) fn points(&self) -> &[Point] {
        &self.points
    }

    /// Adds `at` unless it repeats the previous point.
    pub(crate) fn advance<R: Renderer>(
        &mut self,
        at: Point,
        style: StrokeStyle,
        renderer: &mut R,
    ) -> Result<(), RenderError> {
        if self.points.last() == Some(&at) {
            return Ok(());
        }
        self.points.push(at);

        match self.handle {
            Some(handle) => renderer.extend_polyline(handle, at)?,
            None if self.points.len() >= 2 => {
                self.handle = Some(renderer.create_polyline(&self.points, style.color, style.width)?);
            }
            None => {}
        }
        Ok(())
    }

    /// Empties the buffer, handing back the live object if one was created.
    pub(crate) fn take(&mut self) -> Option<ObjectHandle> {
        self.points.clear();
        self.handle.take()
    }
}

/// Straight segment under construction.
///
/// The anchor is fixed on the first tick; afterwards only the far endpoint
/// follows the pointer. The object appears once the pointer leaves the anchor.
#[derive(Debug, Default)]
pub(crate) struct LineStroke {
    anchor: Option<Point>,
    handle: Option<ObjectHandle>,
}

impl LineStroke {
    pub(crate) fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.handle.is_none()
    }

    pub(crate) fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub(crate) fn advance<R: Renderer>(
        &mut self,
        at: Point,
        style: StrokeStyle,
        renderer: &mut R,
    ) -> Result<(), RenderError> {
        let anchor = *self.anchor.get_or_insert(at);
        match self.handle {
            Some(handle) => renderer.set_segment(handle, anchor, at)?,
            None if at != anchor => {
                self.handle = Some(renderer.create_polyline(&[anchor, at], style.color, style.width)?);
            }
            None => {}
        }
        Ok(())
    }

    pub(crate) fn take(&mut self) -> Option<ObjectHandle> {
        self.anchor = None;
        self.handle.take()
    }
}
