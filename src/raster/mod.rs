//! Raster images: background underlays and exported canvases.
//!
//! This module provides:
//! - [`Raster`], a Cairo-backed bitmap used for both backgrounds and exports
//! - Decoding of PNG, JPEG and BMP files
//! - Encoding to PNG, JPEG or BMP with atomic file writes

pub mod file;
pub mod surface;
pub mod types;


pub use file::{
    directory_target, ensure_directory_exists, expand_tilde, generate_filename, load_from_path,
    resolve_target, save_to_path, write_atomically,
};
pub use surface::Raster;
pub use types::{ExportFormat, RasterError};
