//! Toolbar actions wired to the drawing surface.
//!
//! The window chrome is not part of this crate. What it would do on a button
//! press is here: ask a [`Dialogs`] implementation for input, treat `None` as
//! a cancellation, run the action against the [`DrawingSurface`] and report
//! failures back through the dialogs.

mod dependencies;
#[cfg(test)]
mod tests;

pub use dependencies::{Dialogs, FileImageStore, HeadlessDialogs, ImageStore};

use crate::config::Config;
use crate::input::Mode;
use crate::raster::{self, ExportFormat};
use crate::surface::DrawingSurface;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Result of a user-facing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action ran to completion
    Completed,
    /// The user dismissed a dialog; nothing changed
    Cancelled,
    /// The action failed; the message was already reported
    Failed(String),
}

impl ActionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ActionOutcome::Failed(_))
    }
}

/// Where saves without an explicit path end up.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub directory: PathBuf,
    pub filename_template: String,
    pub format: ExportFormat,
}

impl ExportTarget {
    pub fn from_config(config: &Config) -> Self {
        Self {
            directory: config.export_directory(),
            filename_template: config.export.filename_template.clone(),
            format: config.export.format,
        }
    }
}

/// A drawing surface plus the collaborators its toolbar needs.
pub struct PaintApp {
    surface: DrawingSurface,
    dialogs: Box<dyn Dialogs>,
    store: Box<dyn ImageStore>,
    pen_sizes: Vec<u32>,
    export_target: ExportTarget,
}

impl PaintApp {
    pub fn new(
        config: &Config,
        dialogs: Box<dyn Dialogs>,
        store: Box<dyn ImageStore>,
    ) -> Self {
        Self {
            surface: DrawingSurface::from_config(config),
            dialogs,
            store,
            pen_sizes: config.drawing.pen_sizes.clone(),
            export_target: ExportTarget::from_config(config),
        }
    }

    /// App over the real filesystem that never prompts.
    pub fn headless(config: &Config) -> Self {
        Self::new(config, Box::new(HeadlessDialogs), Box::new(FileImageStore))
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    /// Pen widths offered by the pen size selector.
    pub fn pen_sizes(&self) -> &[u32] {
        &self.pen_sizes
    }

    pub fn export_target(&self) -> &ExportTarget {
        &self.export_target
    }

    /// "Load image": asks for a file and makes it the background.
    pub fn load_image(&mut self) -> ActionOutcome {
        match self.dialogs.open_image_path() {
            Some(path) => self.load_image_from(&path),
            None => {
                info!("Image load cancelled");
                ActionOutcome::Cancelled
            }
        }
    }

    /// Loads `path` as the background. The old background survives a failure.
    pub fn load_image_from(&mut self, path: &Path) -> ActionOutcome {
        match self.store.load(path) {
            Ok(raster) => {
                self.surface.load_background(raster);
                ActionOutcome::Completed
            }
            Err(err) => self.fail("Could not open image", err.to_string()),
        }
    }

    /// "Save image": asks for a destination and exports the canvas there.
    pub fn save_image(&mut self) -> ActionOutcome {
        match self.dialogs.save_image_path() {
            Some((path, filter)) => self.save_image_to(&path, filter),
            None => {
                info!("Image save cancelled");
                ActionOutcome::Cancelled
            }
        }
    }

    /// Exports the committed canvas to `path`.
    ///
    /// The scene is snapshotted when this is called; a gesture in progress is
    /// not part of the file.
    pub fn save_image_to(&mut self, path: &Path, filter: Option<ExportFormat>) -> ActionOutcome {
        let raster = match self.surface.export_composite() {
            Ok(raster) => raster,
            Err(err) => return self.fail("Could not save image", err.to_string()),
        };

        match self.store.save(&raster, path, filter) {
            Ok(written) => {
                info!("Canvas saved to {}", written.display());
                ActionOutcome::Completed
            }
            Err(err) => self.fail("Could not save image", err.to_string()),
        }
    }

    /// Exports into the configured directory under a generated name.
    pub fn save_image_to_default(&mut self) -> ActionOutcome {
        let target = &self.export_target;
        let format = target.format;
        match raster::directory_target(&target.directory, &target.filename_template, format) {
            Ok(path) => self.save_image_to(&path, Some(format)),
            Err(err) => self.fail("Could not save image", err.to_string()),
        }
    }

    /// "Color": asks for a color and makes it the pen color.
    pub fn choose_color(&mut self) -> ActionOutcome {
        let current = self.surface.tool().color;
        match self.dialogs.pick_color(current) {
            Some(color) => {
                self.surface.set_color(color);
                ActionOutcome::Completed
            }
            None => ActionOutcome::Cancelled,
        }
    }

    /// Pen size selector: picks the `index`-th configured width.
    pub fn select_pen_size(&mut self, index: usize) -> ActionOutcome {
        match self.pen_sizes.get(index).copied() {
            Some(width) => {
                self.surface.set_stroke_width(width);
                ActionOutcome::Completed
            }
            None => {
                warn!(
                    "Pen size index {} out of range (have {})",
                    index,
                    self.pen_sizes.len()
                );
                ActionOutcome::Failed(format!(
                    "no pen size at index {index} (have {})",
                    self.pen_sizes.len()
                ))
            }
        }
    }

    /// Mode radio buttons.
    pub fn select_mode(&mut self, mode: Mode) -> ActionOutcome {
        self.surface.set_mode(mode);
        ActionOutcome::Completed
    }

    /// "Clear" button.
    pub fn clear(&mut self) -> ActionOutcome {
        self.surface.clear();
        ActionOutcome::Completed
    }

    fn fail(&self, title: &str, message: String) -> ActionOutcome {
        error!("{}: {}", title, message);
        self.dialogs.report_error(title, &message);
        ActionOutcome::Failed(message)
    }
}
