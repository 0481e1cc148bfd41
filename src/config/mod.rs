//! Configuration file support for surgimark.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/surgimark/config.toml`. Settings include click timing, stroke
//! ink, tick rate and indicator appearance.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{DrawingConfig, GestureConfig, IndicatorConfig, SchedulerConfig};

use crate::annotate::ToolStyles;
use crate::draw::StrokeStyle;
use crate::failsafe::SurfaceSettings;
use crate::input::GestureThresholds;
use crate::ui::{OverlayStyle, PointerInk};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [gesture]
/// double_click_threshold_ms = 200
/// long_press_ms = 500
///
/// [drawing]
/// color = "green"
/// background_color = "white"
/// stroke_width = 10.0
/// eraser_width = 30.0
/// line_width = 10.0
///
/// [scheduler]
/// fps = 60
///
/// [indicator]
/// tint = "red"
/// transient_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Click classification timing
    #[serde(default)]
    pub gesture: GestureConfig,

    /// Stroke ink and surface background
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Tick rate
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Indicator badge and pointer overlay
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `double_click_threshold_ms`: 50 - 1000
    /// - `long_press_ms`: 100 - 3000, and above the double-click threshold
    /// - stroke, eraser and line widths: 1.0 - 100.0
    /// - `fps`: 1 - 240
    /// - indicator `size`: 16.0 - 400.0
    pub fn validate_and_clamp(&mut self) {
        let gesture = &mut self.gesture;
        if !(50..=1000).contains(&gesture.double_click_threshold_ms) {
            log::warn!(
                "Invalid double_click_threshold_ms {}, clamping to 50-1000 range",
                gesture.double_click_threshold_ms
            );
            gesture.double_click_threshold_ms = gesture.double_click_threshold_ms.clamp(50, 1000);
        }

        if !(100..=3000).contains(&gesture.long_press_ms) {
            log::warn!(
                "Invalid long_press_ms {}, clamping to 100-3000 range",
                gesture.long_press_ms
            );
            gesture.long_press_ms = gesture.long_press_ms.clamp(100, 3000);
        }

        // A long press shorter than the double window would make every
        // quick second click ambiguous.
        if gesture.long_press_ms <= gesture.double_click_threshold_ms {
            log::warn!(
                "long_press_ms {} does not exceed double_click_threshold_ms {}, raising it",
                gesture.long_press_ms,
                gesture.double_click_threshold_ms
            );
            gesture.long_press_ms = gesture.double_click_threshold_ms + 1;
        }

        clamp_f64("stroke_width", &mut self.drawing.stroke_width, 1.0, 100.0);
        clamp_f64("eraser_width", &mut self.drawing.eraser_width, 1.0, 100.0);
        clamp_f64("line_width", &mut self.drawing.line_width, 1.0, 100.0);

        if !(1..=240).contains(&self.scheduler.fps) {
            log::warn!(
                "Invalid fps {}, clamping to 1-240 range",
                self.scheduler.fps
            );
            self.scheduler.fps = self.scheduler.fps.clamp(1, 240);
        }

        clamp_f64("indicator size", &mut self.indicator.size, 16.0, 400.0);
        clamp_f64("pointer_size", &mut self.indicator.pointer_size, 4.0, 400.0);
        clamp_f64("ui_line_width", &mut self.indicator.ui_line_width, 1.0, 20.0);

        for (name, spec) in [
            ("drawing.color", &self.drawing.color),
            ("drawing.background_color", &self.drawing.background_color),
            ("indicator.tint", &self.indicator.tint),
        ] {
            if !spec.is_known() {
                log::warn!("Unknown color {:?} for {}, red will be used", spec, name);
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/surgimark/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("surgimark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Session parameters for the failsafe supervisor.
    pub fn surface_settings(&self) -> SurfaceSettings {
        let foreground = self.drawing.color.to_color();
        let background = self.drawing.background_color.to_color();
        SurfaceSettings {
            thresholds: GestureThresholds {
                double_click: Duration::from_millis(self.gesture.double_click_threshold_ms),
                long_press: Duration::from_millis(self.gesture.long_press_ms),
            },
            styles: ToolStyles {
                draw: StrokeStyle::new(foreground, self.drawing.stroke_width),
                erase: StrokeStyle::new(background, self.drawing.eraser_width),
                line: StrokeStyle::new(foreground, self.drawing.line_width),
            },
            indicator_linger: Duration::from_millis(self.indicator.transient_ms),
        }
    }

    /// Interval between scheduler ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.scheduler.fps.max(1)
    }

    pub fn overlay_style(&self) -> OverlayStyle {
        OverlayStyle {
            tint: self.indicator.tint.to_color(),
            indicator_size: self.indicator.size,
            pointer_size: self.indicator.pointer_size,
            line_width: self.indicator.ui_line_width,
        }
    }

    pub fn pointer_ink(&self) -> PointerInk {
        PointerInk {
            foreground: self.drawing.color.to_color(),
            background: self.drawing.background_color.to_color(),
            stroke_width: self.drawing.stroke_width,
            eraser_width: self.drawing.eraser_width,
        }
    }
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if (min..=max).contains(&*value) {
        return;
    }
    log::warn!(
        "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
        name,
        *value,
        min,
        max
    );
    *value = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{GREEN, WHITE};
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let settings = config.surface_settings();
        assert_eq!(settings.thresholds, GestureThresholds::default());
        assert_eq!(settings.styles.draw, StrokeStyle::new(GREEN, 10.0));
        assert_eq!(settings.styles.erase, StrokeStyle::new(WHITE, 30.0));
        assert_eq!(settings.indicator_linger, Duration::from_millis(500));
        assert_eq!(config.tick_interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [gesture]
            double_click_threshold_ms = 5
            long_press_ms = 20

            [drawing]
            stroke_width = 500.0
            eraser_width = 0.0

            [scheduler]
            fps = 0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.gesture.double_click_threshold_ms, 50);
        assert_eq!(config.gesture.long_press_ms, 100);
        assert_eq!(config.drawing.stroke_width, 100.0);
        assert_eq!(config.drawing.eraser_width, 1.0);
        assert_eq!(config.scheduler.fps, 1);
    }

    #[test]
    fn long_press_is_raised_above_double_threshold() {
        let mut config = Config::default();
        config.gesture.double_click_threshold_ms = 800;
        config.gesture.long_press_ms = 300;
        config.validate_and_clamp();
        assert_eq!(config.gesture.long_press_ms, 801);
    }

    #[test]
    fn load_from_reads_rgb_colors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[drawing]\ncolor = [255, 0, 0]\n\n[indicator]\ntint = \"blue\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.drawing.color, ColorSpec::Rgb([255, 0, 0]));
        assert_eq!(config.overlay_style().tint, crate::draw::color::BLUE);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scheduler]\nfps = \"fast\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }
}
