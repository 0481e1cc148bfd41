//! Geometry and style values exchanged with the renderer.

use super::color::Color;

/// Pointer position in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub(crate) fn as_f64(self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Ink applied to a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
}

impl StrokeStyle {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Captured geometry and style of one renderer object.
///
/// This is what a clear snapshot holds per stroke; recreating an object from
/// a record reproduces it exactly, only under a new handle.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRecord {
    /// Polyline vertices in draw order
    pub points: Vec<Point>,
    /// Color and width
    pub style: StrokeStyle,
}
