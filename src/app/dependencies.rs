use std::path::{Path, PathBuf};

use crate::draw::Color;
use crate::raster::{self, ExportFormat, Raster, RasterError};

/// Native dialogs the toolbar actions talk to.
///
/// Every picker returns `None` when the user cancels.
pub trait Dialogs {
    /// Asks for an image to use as the background.
    fn open_image_path(&self) -> Option<PathBuf>;

    /// Asks where to save the canvas, with the file-type filter that was selected.
    fn save_image_path(&self) -> Option<(PathBuf, Option<ExportFormat>)>;

    /// Asks for a new pen color, starting from `current`.
    fn pick_color(&self, current: Color) -> Option<Color>;

    /// Shows a failed action to the user.
    fn report_error(&self, title: &str, message: &str);
}

/// Abstraction over decoding and encoding image files. Mocked in tests.
pub trait ImageStore {
    fn load(&self, path: &Path) -> Result<Raster, RasterError>;

    fn save(
        &self,
        raster: &Raster,
        path: &Path,
        filter: Option<ExportFormat>,
    ) -> Result<PathBuf, RasterError>;
}

/// [`ImageStore`] backed by the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageStore;

impl ImageStore for FileImageStore {
    fn load(&self, path: &Path) -> Result<Raster, RasterError> {
        raster::load_from_path(path)
    }

    fn save(
        &self,
        raster: &Raster,
        path: &Path,
        filter: Option<ExportFormat>,
    ) -> Result<PathBuf, RasterError> {
        raster::save_to_path(raster, path, filter)
    }
}

/// [`Dialogs`] for runs without a display.
///
/// Every picker reports a cancellation. Errors are already logged by the
/// action that failed, so nothing is shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessDialogs;

impl Dialogs for HeadlessDialogs {
    fn open_image_path(&self) -> Option<PathBuf> {
        None
    }

    fn save_image_path(&self) -> Option<(PathBuf, Option<ExportFormat>)> {
        None
    }

    fn pick_color(&self, _current: Color) -> Option<Color> {
        None
    }

    fn report_error(&self, title: &str, message: &str) {
        log::debug!("No dialog for error '{}': {}", title, message);
    }
}
