//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Click classification timing.
///
/// Both thresholds are measured against monotonic event timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GestureConfig {
    /// Maximum gap between two releases of the same button that still counts
    /// as a double click, in milliseconds (valid range: 50 - 1000)
    #[serde(default = "default_double_click_threshold")]
    pub double_click_threshold_ms: u64,

    /// Hold duration from which a click counts as a long press, in
    /// milliseconds (valid range: 100 - 3000, must exceed the double-click
    /// threshold)
    #[serde(default = "default_long_press")]
    pub long_press_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_click_threshold_ms: default_double_click_threshold(),
            long_press_ms: default_long_press(),
        }
    }
}

/// Ink used by the drawing tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Foreground color for draw and line strokes - either a named color
    /// (red, green, blue, yellow, gray, white, black) or an RGB array like
    /// `[0, 255, 0]`
    #[serde(default = "default_color")]
    pub color: ColorSpec,

    /// Surface background; the eraser paints with this color
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Freehand pen width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Eraser width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_eraser_width")]
    pub eraser_width: f64,

    /// Straight line width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            background_color: default_background_color(),
            stroke_width: default_stroke_width(),
            eraser_width: default_eraser_width(),
            line_width: default_line_width(),
        }
    }
}

/// Tick scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SchedulerConfig {
    /// Ticks per second (valid range: 1 - 240)
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

/// Tool indicator and pointer overlay appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndicatorConfig {
    /// Indicator badge tint
    #[serde(default = "default_tint")]
    pub tint: ColorSpec,

    /// Badge edge length in pixels (valid range: 16.0 - 400.0)
    #[serde(default = "default_indicator_size")]
    pub size: f64,

    /// How long the undo/clear indicator stays visible, in milliseconds
    #[serde(default = "default_transient")]
    pub transient_ms: u64,

    /// Crosshair span in pixels (valid range: 4.0 - 400.0)
    #[serde(default = "default_pointer_size")]
    pub pointer_size: f64,

    /// Outline and crosshair width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_ui_line_width")]
    pub ui_line_width: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            tint: default_tint(),
            size: default_indicator_size(),
            transient_ms: default_transient(),
            pointer_size: default_pointer_size(),
            ui_line_width: default_ui_line_width(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_double_click_threshold() -> u64 {
    200
}

fn default_long_press() -> u64 {
    500
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("green".to_string())
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_stroke_width() -> f64 {
    10.0
}

fn default_eraser_width() -> f64 {
    30.0
}

fn default_line_width() -> f64 {
    10.0
}

fn default_fps() -> u32 {
    60
}

fn default_tint() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_indicator_size() -> f64 {
    100.0
}

fn default_transient() -> u64 {
    500
}

fn default_pointer_size() -> f64 {
    50.0
}

fn default_ui_line_width() -> f64 {
    5.0
}
