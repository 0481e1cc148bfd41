use super::*;
use crate::draw::color::{GREEN, WHITE};
use crate::draw::{
    Canvas, Color, ObjectHandle, Point, RenderError, Renderer, StrokeRecord, StrokeStyle,
};
use crate::input::ToolState;

/// Canvas wrapper that logs every renderer call by name.
struct Recording {
    canvas: Canvas,
    calls: Vec<&'static str>,
}

impl Recording {
    fn new() -> Self {
        Self {
            canvas: Canvas::new(WHITE),
            calls: Vec::new(),
        }
    }

    fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|call| **call == name).count()
    }
}

impl Renderer for Recording {
    fn create_polyline(
        &mut self,
        points: &[Point],
        color: Color,
        width: f64,
    ) -> Result<ObjectHandle, RenderError> {
        self.calls.push("create_polyline");
        self.canvas.create_polyline(points, color, width)
    }

    fn extend_polyline(&mut self, handle: ObjectHandle, point: Point) -> Result<(), RenderError> {
        self.calls.push("extend_polyline");
        self.canvas.extend_polyline(handle, point)
    }

    fn set_segment(
        &mut self,
        handle: ObjectHandle,
        p1: Point,
        p2: Point,
    ) -> Result<(), RenderError> {
        self.calls.push("set_segment");
        self.canvas.set_segment(handle, p1, p2)
    }

    fn geometry_and_style(&self, handle: ObjectHandle) -> Result<StrokeRecord, RenderError> {
        self.canvas.geometry_and_style(handle)
    }

    fn delete(&mut self, handle: ObjectHandle) -> Result<(), RenderError> {
        self.calls.push("delete");
        self.canvas.delete(handle)
    }

    fn delete_all_tagged(&mut self, tag: &str) -> Result<usize, RenderError> {
        self.calls.push("delete_all_tagged");
        self.canvas.delete_all_tagged(tag)
    }
}

fn styles() -> ToolStyles {
    ToolStyles {
        draw: StrokeStyle::new(GREEN, 10.0),
        erase: StrokeStyle::new(WHITE, 30.0),
        line: StrokeStyle::new(GREEN, 8.0),
    }
}

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Ticks `state` once per point.
fn trace(
    engine: &mut AnnotationEngine,
    renderer: &mut Recording,
    state: ToolState,
    points: &[(i32, i32)],
) {
    for (x, y) in points {
        assert_eq!(engine.tick(state, p(*x, *y), renderer).unwrap(), state);
    }
}

#[test]
fn draw_creates_one_object_on_second_point_and_extends_it() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(10, 10)]);
    assert!(renderer.calls.is_empty());

    trace(
        &mut engine,
        &mut renderer,
        ToolState::Draw,
        &[(20, 10), (20, 20), (30, 20)],
    );
    assert_eq!(renderer.count("create_polyline"), 1);
    assert_eq!(renderer.count("extend_polyline"), 2);
    assert_eq!(renderer.canvas.len(), 1);
    assert!(engine.registry().is_empty());
}

#[test]
fn draw_skips_repeated_points() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(
        &mut engine,
        &mut renderer,
        ToolState::Draw,
        &[(1, 1), (1, 1), (2, 2), (2, 2), (2, 2)],
    );
    assert_eq!(engine.buffered_points(ToolState::Draw), &[p(1, 1), p(2, 2)]);
    assert_eq!(renderer.calls, vec!["create_polyline"]);
}

#[test]
fn leaving_draw_finalizes_exactly_one_object() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(
        &mut engine,
        &mut renderer,
        ToolState::Draw,
        &[(10, 10), (20, 10), (20, 20)],
    );
    engine.tick(ToolState::Pointer, p(20, 20), &mut renderer).unwrap();

    assert_eq!(engine.registry().len(), 1);
    let record = renderer.geometry_and_style(engine.registry()[0]).unwrap();
    assert_eq!(record.points, vec![p(10, 10), p(20, 10), p(20, 20)]);
    assert_eq!(record.style, styles().draw);
    assert!(!engine.has_live_stroke());
}

#[test]
fn single_point_stroke_is_dropped_without_registry_push() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Erase, &[(5, 5), (5, 5)]);
    assert!(engine.has_live_stroke());

    engine.tick(ToolState::Pointer, p(5, 5), &mut renderer).unwrap();
    assert!(engine.registry().is_empty());
    assert!(!engine.has_live_stroke());
    assert!(renderer.calls.is_empty());
}

#[test]
fn erase_overpaints_with_background_style() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Erase, &[(0, 0), (4, 0)]);
    engine.tick(ToolState::Draw, p(4, 0), &mut renderer).unwrap();

    let record = renderer.geometry_and_style(engine.registry()[0]).unwrap();
    assert_eq!(record.style, StrokeStyle::new(WHITE, 30.0));
}

#[test]
fn line_moves_endpoint_without_accumulating() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(
        &mut engine,
        &mut renderer,
        ToolState::Line,
        &[(0, 0), (0, 0), (10, 0), (10, 10), (30, 40)],
    );
    assert_eq!(engine.line_anchor(), Some(p(0, 0)));
    assert_eq!(renderer.count("create_polyline"), 1);
    assert_eq!(renderer.count("set_segment"), 2);

    engine.tick(ToolState::Pointer, p(30, 40), &mut renderer).unwrap();
    let record = renderer.geometry_and_style(engine.registry()[0]).unwrap();
    assert_eq!(record.points, vec![p(0, 0), p(30, 40)]);
    assert_eq!(engine.line_anchor(), None);
}

#[test]
fn line_without_movement_leaves_nothing() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Line, &[(7, 7), (7, 7)]);
    engine.tick(ToolState::Pointer, p(7, 7), &mut renderer).unwrap();
    assert!(engine.registry().is_empty());
    assert!(renderer.calls.is_empty());
}

#[test]
fn undo_and_clear_fall_back_to_pointer() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    assert_eq!(
        engine.tick(ToolState::Undo, p(0, 0), &mut renderer).unwrap(),
        ToolState::Pointer
    );
    assert_eq!(
        engine.tick(ToolState::Clear, p(0, 0), &mut renderer).unwrap(),
        ToolState::Pointer
    );
}

#[test]
fn undo_on_empty_engine_makes_no_renderer_calls() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    assert_eq!(engine.undo(&mut renderer).unwrap(), UndoOutcome::Nothing);
    assert!(renderer.calls.is_empty());
}

#[test]
fn undo_removes_most_recent_stroke() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(0, 0), (5, 5)]);
    trace(&mut engine, &mut renderer, ToolState::Line, &[(9, 9), (19, 9)]);
    engine.finalize_exited(ToolState::Pointer);
    let line = engine.registry()[1];

    assert_eq!(
        engine.undo(&mut renderer).unwrap(),
        UndoOutcome::RemovedStroke(line)
    );
    assert_eq!(engine.registry().len(), 1);
    assert_eq!(renderer.canvas.len(), 1);
}

#[test]
fn clear_then_undo_restores_geometry_in_order() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(0, 0), (5, 5), (9, 1)]);
    trace(&mut engine, &mut renderer, ToolState::Erase, &[(3, 3), (4, 4)]);
    engine.finalize_exited(ToolState::Pointer);
    let before: Vec<_> = engine
        .registry()
        .iter()
        .map(|handle| renderer.geometry_and_style(*handle).unwrap())
        .collect();

    assert_eq!(engine.clear(&mut renderer).unwrap(), 2);
    assert!(engine.registry().is_empty());
    assert!(renderer.canvas.is_empty());
    assert_eq!(engine.snapshot().map(<[_]>::len), Some(2));

    assert_eq!(engine.undo(&mut renderer).unwrap(), UndoOutcome::Restored(2));
    let after: Vec<_> = engine
        .registry()
        .iter()
        .map(|handle| renderer.geometry_and_style(*handle).unwrap())
        .collect();
    assert_eq!(after, before);
    assert!(engine.snapshot().is_none());

    // The restore is one step: the next undo removes the top stroke only.
    assert!(matches!(
        engine.undo(&mut renderer).unwrap(),
        UndoOutcome::RemovedStroke(_)
    ));
    assert_eq!(engine.registry().len(), 1);
}

#[test]
fn second_clear_overwrites_snapshot() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(0, 0), (5, 5)]);
    engine.finalize_exited(ToolState::Pointer);
    engine.clear(&mut renderer).unwrap();
    engine.clear(&mut renderer).unwrap();

    assert!(engine.snapshot().is_none());
    assert_eq!(engine.undo(&mut renderer).unwrap(), UndoOutcome::Nothing);
}

#[test]
fn stroke_finalized_after_clear_invalidates_snapshot() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(0, 0), (5, 5)]);
    engine.finalize_exited(ToolState::Pointer);
    engine.clear(&mut renderer).unwrap();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(1, 1), (2, 2)]);
    assert!(engine.snapshot().is_some(), "live stroke keeps the snapshot");
    engine.finalize_exited(ToolState::Pointer);
    assert!(engine.snapshot().is_none());

    assert!(matches!(
        engine.undo(&mut renderer).unwrap(),
        UndoOutcome::RemovedStroke(_)
    ));
    assert_eq!(engine.undo(&mut renderer).unwrap(), UndoOutcome::Nothing);
    assert!(renderer.canvas.is_empty());
}

#[test]
fn clear_mid_stroke_includes_the_exited_stroke() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(0, 0), (5, 5)]);
    engine.tick(ToolState::Clear, p(5, 5), &mut renderer).unwrap();

    assert!(renderer.canvas.is_empty());
    assert_eq!(engine.snapshot().map(<[_]>::len), Some(1));
}

#[test]
fn stale_registry_handle_is_reported_by_undo() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    trace(&mut engine, &mut renderer, ToolState::Draw, &[(0, 0), (5, 5)]);
    engine.finalize_exited(ToolState::Pointer);
    let handle = engine.registry()[0];
    renderer.canvas.delete(handle).unwrap();

    assert_eq!(
        engine.undo(&mut renderer),
        Err(HistoryError::Undo {
            stage: "removing the last stroke",
            source: RenderError::StaleHandle(handle),
        })
    );
}

#[test]
fn failsafe_state_is_not_dispatchable() {
    let mut engine = AnnotationEngine::new(styles());
    let mut renderer = Recording::new();

    assert!(matches!(
        engine.tick(ToolState::Failsafe, p(0, 0), &mut renderer),
        Err(EngineError::Transition(_))
    ));
}
