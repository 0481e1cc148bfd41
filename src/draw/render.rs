//! Renderer contract and Cairo rasterization of polylines.

use super::arena::ObjectHandle;
use super::color::Color;
use super::shape::{Point, StrokeRecord, StrokeStyle};
use thiserror::Error;

/// Tag carried by every annotation object the engine creates.
pub const ANNOTATION_TAG: &str = "annotation";

/// Faults reported by a renderer backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("stale or unknown object handle {0:?}")]
    StaleHandle(ObjectHandle),

    #[error("polyline needs at least {required} points, got {got}")]
    TooFewPoints { required: usize, got: usize },

    #[error("rendering backend failure: {0}")]
    Backend(String),
}

/// Drawing surface the annotation engine mutates.
///
/// Objects are addressed by generation-checked handles. Every call either
/// fully succeeds or reports a [`RenderError`]; the engine never retries.
pub trait Renderer {
    /// Creates a polyline object through `points` (at least two).
    fn create_polyline(
        &mut self,
        points: &[Point],
        color: Color,
        width: f64,
    ) -> Result<ObjectHandle, RenderError>;

    /// Appends one vertex to an existing polyline.
    fn extend_polyline(&mut self, handle: ObjectHandle, point: Point) -> Result<(), RenderError>;

    /// Replaces the object's geometry with the single segment `p1`-`p2`.
    fn set_segment(&mut self, handle: ObjectHandle, p1: Point, p2: Point)
    -> Result<(), RenderError>;

    /// Reads back an object's geometry and style.
    fn geometry_and_style(&self, handle: ObjectHandle) -> Result<StrokeRecord, RenderError>;

    /// Deletes one object. The handle is dead afterwards.
    fn delete(&mut self, handle: ObjectHandle) -> Result<(), RenderError>;

    /// Deletes every object carrying `tag`, returning how many went away.
    fn delete_all_tagged(&mut self, tag: &str) -> Result<usize, RenderError>;
}

/// Fills the whole surface with `color`.
pub fn fill_background(ctx: &cairo::Context, color: Color) -> Result<(), cairo::Error> {
    color.apply(ctx);
    ctx.paint()
}

/// Strokes a polyline with round caps and joins.
///
/// Slices with fewer than two points draw nothing.
pub fn render_polyline(
    ctx: &cairo::Context,
    points: &[Point],
    style: StrokeStyle,
) -> Result<(), cairo::Error> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    if rest.is_empty() {
        return Ok(());
    }

    style.color.apply(ctx);
    ctx.set_line_width(style.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let (x0, y0) = first.as_f64();
    ctx.move_to(x0, y0);
    for point in rest {
        let (x, y) = point.as_f64();
        ctx.line_to(x, y);
    }
    ctx.stroke()
}
