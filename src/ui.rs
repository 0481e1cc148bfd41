//! UI rendering: tool indicator badge, pointer overlay, frame composition
use crate::draw::{Canvas, Color, Point};
use crate::input::ToolState;

// ============================================================================
// UI Layout Constants (not configurable)
// ============================================================================

/// Badge X offset from the surface origin
const BADGE_OFFSET_X: f64 = 10.0;
/// Badge Y offset from the surface origin
const BADGE_OFFSET_Y: f64 = 10.0;
/// Label font size as a fraction of the badge size
const BADGE_FONT_RATIO: f64 = 0.22;
/// Fallback character width (in font sizes) when text measuring fails
const BADGE_CHAR_WIDTH_ESTIMATE: f64 = 0.6;

/// Indicator shown at the top-left of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Draw,
    Erase,
    Line,
    Undo,
    Clear,
    Failsafe,
}

impl Indicator {
    /// Lower-case identifier, also used as the badge label.
    pub fn name(self) -> &'static str {
        match self {
            Indicator::Draw => "draw",
            Indicator::Erase => "erase",
            Indicator::Line => "line",
            Indicator::Undo => "undo",
            Indicator::Clear => "clear",
            Indicator::Failsafe => "failsafe",
        }
    }

    /// Indicator that belongs to `state`. `Pointer` shows none; `Failsafe`
    /// is only ever displayed by the supervisor.
    pub fn for_state(state: ToolState) -> Option<Self> {
        match state {
            ToolState::Draw => Some(Indicator::Draw),
            ToolState::Erase => Some(Indicator::Erase),
            ToolState::Line => Some(Indicator::Line),
            ToolState::Undo => Some(Indicator::Undo),
            ToolState::Clear => Some(Indicator::Clear),
            ToolState::Pointer | ToolState::Failsafe => None,
        }
    }
}

/// Sink for indicator changes. Displaying replaces whatever was shown.
pub trait IndicatorDisplay {
    fn display(&mut self, indicator: Indicator);
    fn clear(&mut self);
}

/// Visual parameters shared by the badge and the pointer overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Badge tint
    pub tint: Color,
    /// Badge edge length in pixels
    pub indicator_size: f64,
    /// Crosshair arm span in pixels
    pub pointer_size: f64,
    /// Line width for outlines and the crosshair
    pub line_width: f64,
}

/// Text badge that renders the current indicator.
#[derive(Debug, Default, Clone)]
pub struct IndicatorBadge {
    current: Option<Indicator>,
}

impl IndicatorBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Indicator> {
        self.current
    }

    /// Draws the badge: an outlined square at the top-left with the
    /// indicator name centered inside it.
    pub fn render(&self, ctx: &cairo::Context, style: &OverlayStyle) {
        let Some(indicator) = self.current else {
            return;
        };

        let size = style.indicator_size;
        let label = indicator.name().to_uppercase();
        let font_size = size * BADGE_FONT_RATIO;

        style.tint.apply(ctx);
        ctx.set_line_width(style.line_width);
        ctx.rectangle(BADGE_OFFSET_X, BADGE_OFFSET_Y, size, size);
        let _ = ctx.stroke();

        ctx.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        ctx.set_font_size(font_size);
        let (text_width, text_height) = match ctx.text_extents(&label) {
            Ok(ext) => (ext.width(), ext.height()),
            Err(e) => {
                log::warn!(
                    "Failed to measure indicator label '{}': {}, using fallback width",
                    label,
                    e
                );
                (
                    label.len() as f64 * font_size * BADGE_CHAR_WIDTH_ESTIMATE,
                    font_size,
                )
            }
        };

        let x = BADGE_OFFSET_X + (size - text_width) / 2.0;
        let y = BADGE_OFFSET_Y + (size + text_height) / 2.0;
        ctx.move_to(x, y);
        let _ = ctx.show_text(&label);
    }
}

impl IndicatorDisplay for IndicatorBadge {
    fn display(&mut self, indicator: Indicator) {
        if self.current != Some(indicator) {
            log::debug!("Indicator: {}", indicator.name());
        }
        self.current = Some(indicator);
    }

    fn clear(&mut self) {
        self.current = None;
    }
}

/// Colors and widths the pointer overlay reflects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInk {
    pub foreground: Color,
    pub background: Color,
    pub stroke_width: f64,
    pub eraser_width: f64,
}

/// Render the pointer overlay for `state` at `pointer`.
///
/// The overlay lives outside the canvas, so undo and clear never see it.
pub fn render_pointer_overlay(
    ctx: &cairo::Context,
    state: ToolState,
    pointer: Point,
    ink: &PointerInk,
    style: &OverlayStyle,
) {
    let (x, y) = (f64::from(pointer.x), f64::from(pointer.y));

    match state {
        ToolState::Pointer => {
            let half = style.pointer_size / 2.0;
            ink.foreground.apply(ctx);
            ctx.set_line_width(style.line_width);
            ctx.move_to(x - half, y);
            ctx.line_to(x + half, y);
            ctx.move_to(x, y - half);
            ctx.line_to(x, y + half);
            let _ = ctx.stroke();
        }
        ToolState::Draw | ToolState::Line => {
            let half = ink.stroke_width / 2.0;
            ink.foreground.apply(ctx);
            ctx.rectangle(x - half, y - half, ink.stroke_width, ink.stroke_width);
            let _ = ctx.fill();
        }
        ToolState::Erase => {
            let half = ink.eraser_width / 2.0;
            ink.background.apply(ctx);
            ctx.rectangle(x - half, y - half, ink.eraser_width, ink.eraser_width);
            let _ = ctx.fill_preserve();
            ink.foreground.apply(ctx);
            ctx.set_line_width(style.line_width);
            let _ = ctx.stroke();
        }
        ToolState::Undo | ToolState::Clear | ToolState::Failsafe => {}
    }
}

/// Compose one frame: canvas, pointer overlay, then the indicator badge.
///
/// The overlay is skipped once the session is frozen.
pub fn render_frame(
    ctx: &cairo::Context,
    canvas: &Canvas,
    state: ToolState,
    pointer: Point,
    badge: &IndicatorBadge,
    ink: &PointerInk,
    style: &OverlayStyle,
) -> Result<(), cairo::Error> {
    canvas.paint(ctx)?;
    if state != ToolState::Failsafe {
        render_pointer_overlay(ctx, state, pointer, ink, style);
    }
    badge.render(ctx, style);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_follows_stroke_and_action_states() {
        assert_eq!(Indicator::for_state(ToolState::Draw), Some(Indicator::Draw));
        assert_eq!(Indicator::for_state(ToolState::Clear), Some(Indicator::Clear));
        assert_eq!(Indicator::for_state(ToolState::Pointer), None);
        assert_eq!(Indicator::for_state(ToolState::Failsafe), None);
    }

    #[test]
    fn badge_display_replaces_and_clear_hides() {
        let mut badge = IndicatorBadge::new();
        badge.display(Indicator::Erase);
        badge.display(Indicator::Undo);
        assert_eq!(badge.current(), Some(Indicator::Undo));
        badge.clear();
        assert_eq!(badge.current(), None);
    }
}
