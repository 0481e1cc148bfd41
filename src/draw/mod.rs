//! Rendering primitives and the annotation surface (Cairo-based).
//!
//! This module defines the drawing types the annotation engine talks to:
//! - [`Renderer`]: the handle-based contract every drawing backend implements
//! - [`Canvas`]: the retained Cairo surface used by the binary
//! - [`ObjectArena`]: generation-checked storage behind object handles
//! - [`Color`], [`Point`], [`StrokeStyle`], [`StrokeRecord`]: plain values

pub mod arena;
pub mod canvas;
pub mod color;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use arena::{ObjectArena, ObjectHandle};
pub use canvas::Canvas;
pub use color::Color;
pub use render::{ANNOTATION_TAG, RenderError, Renderer, render_polyline};
pub use shape::{Point, StrokeRecord, StrokeStyle};
