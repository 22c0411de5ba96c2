//! Configuration type definitions.

use super::enums::{ClearBehavior, ColorSpec};
use crate::input::Mode;
use crate::raster::ExportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool state when the canvas first opens. Users change these at
/// runtime through the toolbar.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a named color, `#rrggbb`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen width in pixels (valid range: 1 - 64)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: u32,

    /// Mode selected at startup
    #[serde(default)]
    pub default_mode: Mode,

    /// Pen widths offered by the pen size selector, in display order
    #[serde(default = "default_pen_sizes")]
    pub pen_sizes: Vec<u32>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_stroke_width: default_stroke_width(),
            default_mode: Mode::default(),
            pen_sizes: default_pen_sizes(),
        }
    }
}

/// Canvas settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Initial surface width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Initial surface height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Fill painted under the background image and shapes
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Whether `clear` also drops the loaded background image
    #[serde(default)]
    pub clear_behavior: ClearBehavior,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background_color: default_background_color(),
            clear_behavior: ClearBehavior::default(),
        }
    }
}

/// Export settings used when no explicit path is given.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for generated export files (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template with chrono format specifiers
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format for generated export files
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: ExportFormat::default(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

pub(crate) fn default_stroke_width() -> u32 {
    2
}

pub(crate) fn default_pen_sizes() -> Vec<u32> {
    vec![1, 2, 3, 4, 5]
}

pub(crate) fn default_canvas_width() -> u32 {
    800
}

pub(crate) fn default_canvas_height() -> u32 {
    600
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_save_directory() -> String {
    "~/Pictures/Sketchboard".to_string()
}

pub(crate) fn default_filename_template() -> String {
    "sketch_%Y-%m-%d_%H%M%S".to_string()
}
