//! Data types for raster loading and export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Output format for exported canvases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Lossless PNG (keeps alpha).
    #[default]
    Png,
    /// JPEG; alpha is dropped.
    #[serde(alias = "jpg")]
    Jpeg,
    /// Uncompressed BMP.
    Bmp,
}

impl ExportFormat {
    /// Canonical file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
        }
    }

    /// Maps a file extension (case-insensitive, without the dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "bmp" => Some(ExportFormat::Bmp),
            _ => None,
        }
    }

    /// Detects the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => f.write_str("PNG"),
            ExportFormat::Jpeg => f.write_str("JPEG"),
            ExportFormat::Bmp => f.write_str("BMP"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim().trim_start_matches('.'))
            .ok_or_else(|| format!("unsupported export format '{s}' (expected png, jpeg or bmp)"))
    }
}

/// Errors that can occur while loading or saving rasters.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode image {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Could not encode {format} image: {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },

    #[error("Unsupported image format for {} (use .png, .jpg or .bmp)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Image surface is in use: {0}")]
    SurfaceBusy(#[from] cairo::BorrowError),
}
