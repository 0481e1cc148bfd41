//! In-memory annotation surface backed by an object arena.

use super::arena::{ObjectArena, ObjectHandle};
use super::color::Color;
use super::render::{ANNOTATION_TAG, RenderError, Renderer, fill_background, render_polyline};
use super::shape::{Point, StrokeRecord, StrokeStyle};

#[derive(Debug)]
struct DrawnObject {
    points: Vec<Point>,
    style: StrokeStyle,
    tag: &'static str,
}

/// Retained-mode surface: owns every annotation object and paints them with
/// Cairo in creation order (first created = bottom layer).
#[derive(Debug)]
pub struct Canvas {
    objects: ObjectArena<DrawnObject>,
    /// Live handles in creation order
    z_order: Vec<ObjectHandle>,
    background: Color,
}

impl Canvas {
    /// Creates an empty canvas painted with `background`.
    pub fn new(background: Color) -> Self {
        Self {
            objects: ObjectArena::new(),
            z_order: Vec::new(),
            background,
        }
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Live handles in paint order.
    pub fn handles(&self) -> &[ObjectHandle] {
        &self.z_order
    }

    /// Paints the background and all objects.
    pub fn paint(&self, ctx: &cairo::Context) -> Result<(), cairo::Error> {
        fill_background(ctx, self.background)?;
        for handle in &self.z_order {
            if let Some(object) = self.objects.get(*handle) {
                render_polyline(ctx, &object.points, object.style)?;
            }
        }
        Ok(())
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Result<&mut DrawnObject, RenderError> {
        self.objects
            .get_mut(handle)
            .ok_or(RenderError::StaleHandle(handle))
    }
}

impl Renderer for Canvas {
    fn create_polyline(
        &mut self,
        points: &[Point],
        color: Color,
        width: f64,
    ) -> Result<ObjectHandle, RenderError> {
        if points.len() < 2 {
            return Err(RenderError::TooFewPoints {
                required: 2,
                got: points.len(),
            });
        }
        let handle = self.objects.insert(DrawnObject {
            points: points.to_vec(),
            style: StrokeStyle::new(color, width),
            tag: ANNOTATION_TAG,
        });
        self.z_order.push(handle);
        Ok(handle)
    }

    fn extend_polyline(&mut self, handle: ObjectHandle, point: Point) -> Result<(), RenderError> {
        self.object_mut(handle)?.points.push(point);
        Ok(())
    }

    fn set_segment(
        &mut self,
        handle: ObjectHandle,
        p1: Point,
        p2: Point,
    ) -> Result<(), RenderError> {
        let object = self.object_mut(handle)?;
        object.points.clear();
        object.points.extend([p1, p2]);
        Ok(())
    }

    fn geometry_and_style(&self, handle: ObjectHandle) -> Result<StrokeRecord, RenderError> {
        self.objects
            .get(handle)
            .map(|object| StrokeRecord {
                points: object.points.clone(),
                style: object.style,
            })
            .ok_or(RenderError::StaleHandle(handle))
    }

    fn delete(&mut self, handle: ObjectHandle) -> Result<(), RenderError> {
        self.objects
            .remove(handle)
            .ok_or(RenderError::StaleHandle(handle))?;
        self.z_order.retain(|live| *live != handle);
        Ok(())
    }

    fn delete_all_tagged(&mut self, tag: &str) -> Result<usize, RenderError> {
        let doomed: Vec<ObjectHandle> = self
            .objects
            .iter()
            .filter(|(_, object)| object.tag == tag)
            .map(|(handle, _)| handle)
            .collect();
        for handle in &doomed {
            self.delete(*handle)?;
        }
        Ok(doomed.len())
    }
}
