//! Utility functions for colors and surface geometry.
//!
//! This module provides:
//! - Name-to-color mapping for config files (constants live in draw::color)
//! - Approximate color naming for log output
//! - `WIDTHxHEIGHT` surface size parsing for the command line

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "gray" (or "grey"), "white", "black"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "gray" | "grey" => Some(GRAY),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors.
///
/// # Returns
/// A static string with the color name, or "Custom" if the color doesn't
/// match any predefined color.
pub fn color_to_name(color: &Color) -> &'static str {
    // Match colors approximately with 0.1 tolerance
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue"
    } else if color.r > 0.9 && color.g > 0.9 && color.b < 0.1 {
        "Yellow"
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black"
    } else if (color.r - color.g).abs() < 0.05
        && (color.g - color.b).abs() < 0.05
        && (0.6..=0.8).contains(&color.r)
    {
        "Gray"
    } else {
        "Custom"
    }
}

// ============================================================================
// Surface Geometry
// ============================================================================

/// Parses a surface size given as `WIDTHxHEIGHT` (e.g. `1920x1080`).
///
/// Both dimensions must be between 1 and 16384 pixels.
pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;

    let parse = |part: &str, what: &str| -> Result<u32, String> {
        let parsed = part
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid {} '{}': {}", what, part, e))?;
        if !(1..=16384).contains(&parsed) {
            return Err(format!("{} {} out of range 1-16384", what, parsed));
        }
        Ok(parsed)
    };

    Ok((parse(width, "width")?, parse(height, "height")?))
}
