//! Utility types and functions for geometry and color names.
//!
//! This module provides:
//! - [`Point`] and the normalized [`Rect`] used by box-shaped tools
//! - Color name and hex parsing for the config file and scripts

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry Utilities
// ============================================================================

/// A position in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box normalized so that `width` and `height` are never negative.
///
/// The extents are unsigned so that boxes spanning the whole `i32` range fit.
///
/// Zero-sized boxes are valid; they come from clicks without a drag and render
/// as degenerate primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Builds the normalized box spanned by two opposite corners, in either order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::from_min_max(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Builds a rectangle from min/max bounds. Callers guarantee `min <= max`.
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x.abs_diff(min_x),
            height: max_y.abs_diff(min_y),
        }
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max(&self) -> Point {
        Point::new(
            self.x.saturating_add_unsigned(self.width),
            self.y.saturating_add_unsigned(self.height),
        )
    }

    /// Returns true if the box has no area (a dot or a straight segment).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and gesture scripts.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Parses `#rrggbb` or `#rrggbbaa` hex notation.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let mut color = Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?);
    if digits.len() == 8 {
        color.a = channel(6)? as f64 / 255.0;
    }
    Some(color)
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors, and falls
/// back to "Custom" for anything else.
pub fn color_to_name(color: &Color) -> &'static str {
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "Red"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "Green"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "Blue"
    } else if color.r > 0.9 && color.g > 0.9 && color.b < 0.1 {
        "Yellow"
    } else if color.r > 0.9 && (0.4..=0.6).contains(&color.g) && color.b < 0.1 {
        "Orange"
    } else if color.r > 0.9 && color.g < 0.1 && color.b > 0.9 {
        "Pink"
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "White"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "Black"
    } else {
        "Custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_corners_normalizes_any_direction() {
        let forward = Rect::from_corners(Point::new(10, 10), Point::new(50, 40));
        let backward = Rect::from_corners(Point::new(50, 40), Point::new(10, 10));
        let mixed = Rect::from_corners(Point::new(10, 40), Point::new(50, 10));
        assert_eq!(forward, backward);
        assert_eq!(forward, mixed);
        assert_eq!(forward.min(), Point::new(10, 10));
        assert_eq!(forward.max(), Point::new(50, 40));
    }

    #[test]
    fn rect_spanning_full_i32_range() {
        let rect = Rect::from_corners(Point::new(i32::MAX, 10), Point::new(i32::MIN, 0));
        assert_eq!(rect.min(), Point::new(i32::MIN, 0));
        assert_eq!(rect.width, u32::MAX);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.max(), Point::new(i32::MAX, 10));
    }

    #[test]
    fn zero_sized_rect_is_degenerate_not_rejected() {
        let rect = Rect::from_corners(Point::new(5, 5), Point::new(5, 5));
        assert_eq!(rect.width, 0);
        assert!(rect.is_degenerate());
    }

    #[test]
    fn name_and_hex_parsing() {
        assert_eq!(name_to_color("White").unwrap(), WHITE);
        assert!(name_to_color("chartreuse").is_none());
        assert_eq!(hex_to_color("#ff0000").unwrap(), RED);
        let translucent = hex_to_color("#0000ff80").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
        assert!(hex_to_color("ff0000").is_none());
        assert!(hex_to_color("#ff00").is_none());
    }

    #[test]
    fn color_to_name_matches_known_colors() {
        assert_eq!(color_to_name(&RED), "Red");
        assert_eq!(color_to_name(&BLACK), "Black");
        assert_eq!(color_to_name(&Color::new(0.42, 0.42, 0.42, 1.0)), "Custom");
    }
}
