//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchboard/config.toml`. Settings include drawing defaults,
//! canvas size and fill, and where exported images go.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ClearBehavior, ColorSpec};
pub use types::{CanvasConfig, DrawingConfig, ExportConfig};

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MIN_STROKE_WIDTH: u32 = 1;
const MAX_STROKE_WIDTH: u32 = 64;
const MAX_CANVAS_SIDE: u32 = crate::surface::MAX_SIDE as u32;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// default_stroke_width = 3
/// default_mode = "rectangle"
/// pen_sizes = [1, 2, 3, 4, 5]
///
/// [canvas]
/// width = 1024
/// height = 768
/// background_color = "white"
/// clear_behavior = "shapes-only"
///
/// [export]
/// save_directory = "~/Pictures/Sketchboard"
/// filename_template = "sketch_%Y-%m-%d_%H%M%S"
/// format = "png"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults (color, stroke width, mode, pen sizes)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas size, fill color and clear behavior
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Export destination and format
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: 1 - 64
    /// - each entry of `pen_sizes`: 1 - 64 (an empty list restores the defaults)
    /// - `canvas.width`, `canvas.height`: 1 - 16384
    /// - `export.filename_template`: must be a non-empty chrono format string
    pub fn validate_and_clamp(&mut self) {
        let width_range = MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH;

        if !width_range.contains(&self.drawing.default_stroke_width) {
            log::warn!(
                "Invalid default_stroke_width {}, clamping to {}-{} range",
                self.drawing.default_stroke_width,
                MIN_STROKE_WIDTH,
                MAX_STROKE_WIDTH
            );
            self.drawing.default_stroke_width = self
                .drawing
                .default_stroke_width
                .clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
        }

        if self.drawing.pen_sizes.is_empty() {
            log::warn!("Empty pen_sizes list, falling back to defaults");
            self.drawing.pen_sizes = types::default_pen_sizes();
        }
        for size in &mut self.drawing.pen_sizes {
            if !width_range.contains(size) {
                log::warn!(
                    "Invalid pen size {}, clamping to {}-{} range",
                    size,
                    MIN_STROKE_WIDTH,
                    MAX_STROKE_WIDTH
                );
                *size = (*size).clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
            }
        }

        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width,
                MAX_CANVAS_SIDE
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_SIDE);
        }
        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height,
                MAX_CANVAS_SIDE
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_SIDE);
        }

        for (name, spec) in [
            ("drawing.default_color", &mut self.drawing.default_color),
            ("canvas.background_color", &mut self.canvas.background_color),
        ] {
            if spec.try_to_color().is_none() {
                log::warn!("Invalid {} {:?}, falling back to default", name, spec);
                *spec = if name.starts_with("canvas") {
                    ColorSpec::Name("white".to_string())
                } else {
                    ColorSpec::Name("black".to_string())
                };
            }
        }

        let template = &self.export.filename_template;
        let malformed = StrftimeItems::new(template).any(|item| matches!(item, Item::Error));
        if template.is_empty() || malformed {
            log::warn!(
                "Invalid export.filename_template {:?}, falling back to default",
                template
            );
            self.export.filename_template = types::default_filename_template();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

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

    /// Loads and validates the configuration at `path`.
    ///
    /// Unlike [`Config::load`], a missing file is an error here: an explicit
    /// path that does not exist is almost certainly a typo.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses a TOML document and clamps its values.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Serializes the effective configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Directory for exports without an explicit path, with `~` expanded.
    pub fn export_directory(&self) -> PathBuf {
        crate::raster::expand_tilde(&self.export.save_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};
    use crate::input::Mode;
    use crate::raster::ExportFormat;

    #[test]
    fn unknown_template_specifier_falls_back_to_default() {
        let config = Config::from_toml("[export]\nfilename_template = \"sketch_%Q\"\n").unwrap();
        assert_eq!(
            config.export.filename_template,
            types::default_filename_template()
        );

        let config = Config::from_toml("[export]\nfilename_template = \"\"\n").unwrap();
        assert_eq!(
            config.export.filename_template,
            types::default_filename_template()
        );

        let config = Config::from_toml("[export]\nfilename_template = \"board_%H%M\"\n").unwrap();
        assert_eq!(config.export.filename_template, "board_%H%M");
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.drawing.default_stroke_width, 2);
        assert_eq!(config.drawing.default_mode, Mode::Freeform);
        assert_eq!(config.drawing.pen_sizes, vec![1, 2, 3, 4, 5]);
        assert_eq!((config.canvas.width, config.canvas.height), (800, 600));
        assert_eq!(config.canvas.background_color.to_color(), WHITE);
        assert_eq!(config.canvas.clear_behavior, ClearBehavior::All);
        assert_eq!(config.export.format, ExportFormat::Png);
    }

    #[test]
    fn parses_all_sections() {
        let config = Config::from_toml(
            r##"
            [drawing]
            default_color = [255, 0, 0]
            default_stroke_width = 5
            default_mode = "circle"
            pen_sizes = [2, 4, 8]

            [canvas]
            width = 320
            height = 200
            background_color = "#000000"
            clear_behavior = "shapes-only"

            [export]
            save_directory = "/tmp/sketches"
            format = "jpg"
            "##,
        )
        .unwrap();

        assert_eq!(config.drawing.default_color.to_color(), RED);
        assert_eq!(config.drawing.default_mode, Mode::Ellipse);
        assert_eq!(config.drawing.pen_sizes, vec![2, 4, 8]);
        assert_eq!(config.canvas.background_color.to_color(), BLACK);
        assert_eq!(config.canvas.clear_behavior, ClearBehavior::ShapesOnly);
        assert_eq!(config.export.format, ExportFormat::Jpeg);
        assert_eq!(config.export_directory(), PathBuf::from("/tmp/sketches"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml(
            r#"
            [drawing]
            default_stroke_width = 0
            pen_sizes = [0, 3, 500]
            default_color = "not-a-color"

            [canvas]
            width = 0
            height = 100000
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.default_stroke_width, 1);
        assert_eq!(config.drawing.pen_sizes, vec![1, 3, 64]);
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, 16384);
    }

    #[test]
    fn empty_pen_sizes_restore_defaults() {
        let config = Config::from_toml("[drawing]\npen_sizes = []\n").unwrap();
        assert_eq!(config.drawing.pen_sizes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[drawing\n").is_err());
        assert!(Config::from_toml("[drawing]\ndefault_mode = \"spray\"\n").is_err());
    }

    #[test]
    fn load_from_reads_file_and_rejects_missing() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas]\nwidth = 64\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.canvas.width, 64);
        assert_eq!(config.canvas.height, 600);

        assert!(Config::load_from(&temp.path().join("missing.toml")).is_err());
    }

    #[test]
    fn effective_config_round_trips_through_toml() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let reparsed = Config::from_toml(&text).unwrap();
        assert_eq!(reparsed.canvas.width, config.canvas.width);
        assert_eq!(reparsed.export.filename_template, config.export.filename_template);
    }
}
