//! Loading and saving rasters on disk.

use super::surface::Raster;
use super::types::{ExportFormat, RasterError};
use chrono::Local;
use image::ImageReader;
use std::fs::{self, OpenOptions};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Decodes an image file (PNG, JPEG, BMP) into a raster.
///
/// The format is sniffed from the file contents, falling back to the
/// extension. Nothing is returned unless the whole image decoded.
pub fn load_from_path(path: &Path) -> Result<Raster, RasterError> {
    let bytes = fs::read(path).map_err(|source| RasterError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|source| RasterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if reader.format().is_none()
        && let Ok(format) = image::ImageFormat::from_path(path)
    {
        reader.set_format(format);
    }

    let decoded = reader.decode().map_err(|err| RasterError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let raster = Raster::from_rgba(&decoded.to_rgba8())?;
    log::info!(
        "Loaded image {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

/// Works out the final path and format for a save.
///
/// A recognized extension on `path` wins. Otherwise the dialog `filter`
/// decides and its extension is appended. With neither, the save is refused.
pub fn resolve_target(
    path: &Path,
    filter: Option<ExportFormat>,
) -> Result<(PathBuf, ExportFormat), RasterError> {
    if let Some(format) = ExportFormat::from_path(path) {
        return Ok((path.to_path_buf(), format));
    }

    match filter {
        Some(format) => {
            let mut file_name = path.as_os_str().to_owned();
            file_name.push(".");
            file_name.push(format.extension());
            Ok((PathBuf::from(file_name), format))
        }
        None => Err(RasterError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Encodes `raster` and writes it to `path`.
///
/// Encoding happens in memory first and the file is swapped into place with
/// a rename, so a failed save never leaves a partial file at the target.
///
/// # Returns
/// The path actually written (with an appended extension when the filter
/// supplied the format).
pub fn save_to_path(
    raster: &Raster,
    path: &Path,
    filter: Option<ExportFormat>,
) -> Result<PathBuf, RasterError> {
    let (target, format) = resolve_target(path, filter)?;
    let bytes = raster.encode(format)?;

    log::info!(
        "Saving {} image to: {} ({} bytes)",
        format,
        target.display(),
        bytes.len()
    );
    write_atomically(&target, &bytes)?;
    log::info!("Image saved successfully: {}", target.display());

    Ok(target)
}

/// Picks a path in `directory` named after `template`, creating the directory
/// if needed. Nothing is written to the file itself.
pub fn directory_target(
    directory: &Path,
    template: &str,
    format: ExportFormat,
) -> Result<PathBuf, RasterError> {
    let filename = generate_filename(template, format)?;
    let directory = ensure_directory_exists(directory)?;
    Ok(directory.join(filename))
}

/// Writes `bytes` to a sibling temporary file, syncs it and renames it over `target`.
pub fn write_atomically(target: &Path, bytes: &[u8]) -> Result<(), RasterError> {
    let tmp_path = temp_path(target);

    let result = (|| -> std::io::Result<()> {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;
        tmp_file.write_all(bytes)?;
        tmp_file.sync_all()?;
        fs::rename(&tmp_path, target)
    })();

    if let Err(source) = result {
        if tmp_path.exists() {
            fs::remove_file(&tmp_path).ok();
        }
        return Err(RasterError::Write {
            path: target.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    let mut candidate = target.with_file_name(format!(".{name}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!(".{name}.tmp{counter}"));
    }
    candidate
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - Export format supplying the extension
///
/// Fails with [`RasterError::InvalidTemplate`] when `template` contains a
/// specifier chrono does not understand.
pub fn generate_filename(template: &str, format: ExportFormat) -> Result<String, RasterError> {
    let now = Local::now();
    let mut filename = String::new();
    write!(filename, "{}.{}", now.format(template), format.extension())
        .map_err(|_| RasterError::InvalidTemplate(template.to_string()))?;
    Ok(filename)
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, RasterError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|source| RasterError::Write {
            path: directory.to_path_buf(),
            source,
        })?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
