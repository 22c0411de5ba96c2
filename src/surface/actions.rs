use crate::config::ClearBehavior;
use crate::draw::Color;
use crate::input::Mode;
use crate::raster::{self, Raster, RasterError};
use crate::util;
use log::{debug, info, warn};
use std::path::Path;

use super::{DrawingSurface, GestureState, MAX_SIDE};

impl DrawingSurface {
    /// Sets the color for shapes committed from now on.
    ///
    /// Shapes already in the scene keep their own color; only the preview of
    /// a gesture in progress picks up the change.
    pub fn set_color(&mut self, color: Color) {
        self.tool.color = color;
        self.needs_redraw = true;
        debug!(
            "Color set to {} {:?}",
            util::color_to_name(&color),
            color.to_rgba8()
        );
    }

    /// Sets the stroke width for shapes committed from now on.
    ///
    /// A width of zero is raised to 1.
    pub fn set_stroke_width(&mut self, width: u32) {
        if width == 0 {
            warn!("Stroke width 0 is not drawable, using 1");
        }
        self.tool.stroke_width = width.max(1);
        self.needs_redraw = true;
        debug!("Stroke width set to {}", self.tool.stroke_width);
    }

    /// Selects the drawing mode.
    ///
    /// The kind of shape a gesture commits is decided at release, so switching
    /// mid-gesture changes what the current gesture produces.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.tool.mode != mode {
            debug!("Mode {} -> {}", self.tool.mode, mode);
        }
        self.tool.mode = mode;
        self.needs_redraw = true;
    }

    /// Changes what [`DrawingSurface::clear`] removes.
    pub fn set_clear_behavior(&mut self, behavior: ClearBehavior) {
        self.clear_behavior = behavior;
    }

    /// Sets the fill painted under everything else.
    pub fn set_canvas_color(&mut self, color: Color) {
        self.canvas_color = color;
        self.needs_redraw = true;
    }

    /// Clears according to the configured [`ClearBehavior`].
    pub fn clear(&mut self) {
        match self.clear_behavior {
            ClearBehavior::All => self.clear_all(),
            ClearBehavior::ShapesOnly => self.clear_shapes(),
        }
    }

    /// Removes every shape and any gesture in progress. The background stays.
    pub fn clear_shapes(&mut self) {
        let removed = self.scene.len();
        self.scene.clear();
        self.gesture = GestureState::Idle;
        self.needs_redraw = true;
        info!("Cleared {} shapes", removed);
    }

    /// Removes every shape, any gesture in progress and the background.
    pub fn clear_all(&mut self) {
        self.clear_shapes();
        if self.background.take().is_some() {
            info!("Cleared background image");
        }
    }

    /// Replaces the background wholesale. The scene is untouched.
    pub fn load_background(&mut self, raster: Raster) {
        debug!(
            "Background set to {}x{} raster",
            raster.width(),
            raster.height()
        );
        self.background = Some(raster);
        self.needs_redraw = true;
    }

    /// Decodes `path` and uses it as the background.
    ///
    /// On failure the previous background is kept and the error is returned.
    pub fn load_background_from(&mut self, path: &Path) -> Result<(), RasterError> {
        let raster = raster::load_from_path(path)?;
        self.load_background(raster);
        Ok(())
    }

    /// Changes the surface bounds used for painting and export.
    ///
    /// Sizes are clamped to `0..=MAX_SIDE`; a zero-sized surface paints
    /// nothing and cannot be exported.
    pub fn resize(&mut self, width: i32, height: i32) {
        let valid = 0..=MAX_SIDE;
        if !valid.contains(&width) || !valid.contains(&height) {
            warn!(
                "Surface size {}x{} out of range, clamping to 0-{}",
                width, height, MAX_SIDE
            );
        }
        self.width = width.clamp(0, MAX_SIDE);
        self.height = height.clamp(0, MAX_SIDE);
        self.needs_redraw = true;
        debug!("Surface resized to {}x{}", self.width, self.height);
    }
}
