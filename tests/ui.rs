use cairo::{Context, ImageSurface};
use surgimark::draw::color::{GREEN, RED, WHITE};
use surgimark::draw::{Canvas, Point, Renderer};
use surgimark::input::ToolState;
use surgimark::ui::{
    Indicator, IndicatorBadge, IndicatorDisplay, OverlayStyle, PointerInk, render_frame,
    render_pointer_overlay,
};

const BGRA_RED: [u8; 4] = [0, 0, 255, 255];
const BGRA_GREEN: [u8; 4] = [0, 255, 0, 255];
const BGRA_WHITE: [u8; 4] = [255, 255, 255, 255];

fn style() -> OverlayStyle {
    OverlayStyle {
        tint: RED,
        indicator_size: 100.0,
        pointer_size: 50.0,
        line_width: 5.0,
    }
}

fn ink() -> PointerInk {
    PointerInk {
        foreground: GREEN,
        background: WHITE,
        stroke_width: 10.0,
        eraser_width: 30.0,
    }
}

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

/// Reads one pixel as stored in memory (BGRA on little-endian).
fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
}

fn overlay_at_center(state: ToolState) -> ImageSurface {
    let (surface, ctx) = surface_with_context(100, 100);
    render_pointer_overlay(&ctx, state, Point::new(50, 50), &ink(), &style());
    drop(ctx);
    surface
}

#[test]
fn pointer_overlay_is_a_crosshair_in_foreground_ink() {
    let mut surface = overlay_at_center(ToolState::Pointer);
    assert_eq!(pixel(&mut surface, 50, 35), BGRA_GREEN);
    assert_eq!(pixel(&mut surface, 35, 50), BGRA_GREEN);
    assert_eq!(pixel(&mut surface, 35, 35), [0, 0, 0, 0]);
}

#[test]
fn draw_and_line_overlays_show_the_pen_tip() {
    for state in [ToolState::Draw, ToolState::Line] {
        let mut surface = overlay_at_center(state);
        assert_eq!(pixel(&mut surface, 50, 50), BGRA_GREEN, "{:?}", state);
        assert_eq!(pixel(&mut surface, 60, 50), [0, 0, 0, 0], "{:?}", state);
    }
}

#[test]
fn erase_overlay_is_outlined_background_square() {
    let mut surface = overlay_at_center(ToolState::Erase);
    assert_eq!(pixel(&mut surface, 50, 50), BGRA_WHITE);
    assert_eq!(pixel(&mut surface, 35, 50), BGRA_GREEN);
}

#[test]
fn badge_outline_renders_in_tint() {
    let mut badge = IndicatorBadge::new();
    badge.display(Indicator::Failsafe);

    let (mut surface, ctx) = surface_with_context(200, 200);
    badge.render(&ctx, &style());
    drop(ctx);
    assert_eq!(pixel(&mut surface, 10, 60), BGRA_RED);
}

#[test]
fn cleared_badge_renders_nothing() {
    let mut badge = IndicatorBadge::new();
    badge.display(Indicator::Draw);
    badge.clear();

    let (mut surface, ctx) = surface_with_context(200, 200);
    badge.render(&ctx, &style());
    drop(ctx);
    assert_eq!(pixel(&mut surface, 10, 60), [0, 0, 0, 0]);
}

#[test]
fn frozen_frame_has_no_pointer_overlay() {
    let mut canvas = Canvas::new(WHITE);
    canvas
        .create_polyline(&[Point::new(150, 20), Point::new(150, 180)], GREEN, 8.0)
        .unwrap();
    let badge = IndicatorBadge::new();

    let (mut surface, ctx) = surface_with_context(200, 200);
    render_frame(
        &ctx,
        &canvas,
        ToolState::Failsafe,
        Point::new(60, 150),
        &badge,
        &ink(),
        &style(),
    )
    .unwrap();
    drop(ctx);

    assert_eq!(pixel(&mut surface, 150, 100), BGRA_GREEN);
    assert_eq!(pixel(&mut surface, 60, 150), BGRA_WHITE);
}
