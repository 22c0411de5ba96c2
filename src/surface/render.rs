use crate::draw::{CairoPainter, Painter, render_shapes};
use crate::input::Mode;
use crate::raster::{Raster, RasterError};
use crate::util::{Point, Rect};
use std::borrow::Cow;

use super::{DrawingSurface, GestureState};

impl DrawingSurface {
    /// Paints the full frame: canvas fill, background, scene, then the live
    /// preview of a gesture in progress.
    ///
    /// Painting only reads the surface, so repeating it without changes
    /// produces the same output.
    pub fn paint<P: Painter + ?Sized>(&self, painter: &mut P) {
        self.paint_committed(painter);
        self.paint_preview(painter);
    }

    /// Paints everything except the preview.
    pub fn paint_committed<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.fill(self.canvas_color);
        if let Some(background) = &self.background {
            painter.draw_raster(background, self.width, self.height);
        }
        render_shapes(painter, self.scene.shapes());
    }

    /// Paints the gesture in progress with the current tool settings.
    ///
    /// The points are borrowed, so a long freeform stroke is not copied on
    /// every frame unless a trailing segment has to be added.
    pub fn paint_preview<P: Painter + ?Sized>(&self, painter: &mut P) {
        let GestureState::Drawing { start, end, points } = &self.gesture else {
            return;
        };
        let (color, width) = (self.tool.color, self.tool.stroke_width);

        match self.tool.mode {
            Mode::Freeform => {
                let path: Cow<'_, [Point]> = match points {
                    Some(points) if points.last() == Some(end) => Cow::Borrowed(points.as_slice()),
                    Some(points) => {
                        let mut owned = points.clone();
                        owned.push(*end);
                        Cow::Owned(owned)
                    }
                    None if start == end => Cow::Owned(vec![*start]),
                    None => Cow::Owned(vec![*start, *end]),
                };
                painter.draw_path(&path, color, width);
            }
            Mode::Rectangle => painter.draw_rect(Rect::from_corners(*start, *end), color, width),
            Mode::Line => painter.draw_line(*start, *end, color, width),
            Mode::Ellipse => painter.draw_ellipse(Rect::from_corners(*start, *end), color, width),
        }
    }

    /// Renders the committed canvas offscreen.
    ///
    /// The result is sized to the surface bounds and contains the fill, the
    /// background and every committed shape in order. The preview is left out.
    pub fn export_composite(&self) -> Result<Raster, RasterError> {
        let raster = Raster::new(self.width, self.height)?;
        {
            let ctx = cairo::Context::new(raster.surface())?;
            let mut painter = CairoPainter::new(&ctx);
            self.paint_committed(&mut painter);
        }
        raster.surface().flush();

        log::info!(
            "Composited {} shapes into {}x{} raster",
            self.scene.len(),
            self.width,
            self.height
        );
        Ok(raster)
    }
}
