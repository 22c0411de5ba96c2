//! Painter capability used by the render dispatch, plus its Cairo backend.

use super::color::Color;
use crate::raster::Raster;
use crate::util::{Point, Rect};
use std::f64::consts::PI;

/// Generic 2D drawing capability.
///
/// Shapes never talk to a rendering library directly; they are dispatched
/// onto these primitives, each parameterized by color and stroke width.
pub trait Painter {
    /// Fills the whole target with a solid color, replacing what was there.
    fn fill(&mut self, color: Color);

    /// Draws `raster` stretched over the `width` x `height` area at the origin.
    fn draw_raster(&mut self, raster: &Raster, width: i32, height: i32);

    /// Strokes an open polyline through `points`.
    fn draw_path(&mut self, points: &[Point], color: Color, width: u32);

    /// Strokes the outline of a normalized box.
    fn draw_rect(&mut self, rect: Rect, color: Color, width: u32);

    /// Strokes a straight segment.
    fn draw_line(&mut self, start: Point, end: Point, color: Color, width: u32);

    /// Strokes the ellipse inscribed in a normalized box.
    fn draw_ellipse(&mut self, rect: Rect, color: Color, width: u32);
}

/// [`Painter`] backed by a Cairo context.
///
/// Strokes use round caps and joins with antialiasing, so a single-point
/// path shows up as a dot.
pub struct CairoPainter<'a> {
    ctx: &'a cairo::Context,
}

impl<'a> CairoPainter<'a> {
    pub fn new(ctx: &'a cairo::Context) -> Self {
        ctx.set_antialias(cairo::Antialias::Good);
        Self { ctx }
    }

    fn apply_stroke(&self, color: Color, width: u32) {
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        self.ctx.set_line_width(width.max(1) as f64);
        self.ctx.set_line_cap(cairo::LineCap::Round);
        self.ctx.set_line_join(cairo::LineJoin::Round);
    }
}

impl Painter for CairoPainter<'_> {
    fn fill(&mut self, color: Color) {
        let _ = self.ctx.save();
        self.ctx.set_operator(cairo::Operator::Source);
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        let _ = self.ctx.paint();
        let _ = self.ctx.restore();
    }

    fn draw_raster(&mut self, raster: &Raster, width: i32, height: i32) {
        let (src_width, src_height) = (raster.width(), raster.height());
        if src_width <= 0 || src_height <= 0 || width <= 0 || height <= 0 {
            return;
        }

        let _ = self.ctx.save();
        self.ctx.scale(
            width as f64 / src_width as f64,
            height as f64 / src_height as f64,
        );
        if self
            .ctx
            .set_source_surface(raster.surface(), 0.0, 0.0)
            .is_ok()
        {
            let source = self.ctx.source();
            source.set_extend(cairo::Extend::Pad);
            source.set_filter(cairo::Filter::Good);
            let _ = self.ctx.paint();
        }
        let _ = self.ctx.restore();
    }

    fn draw_path(&mut self, points: &[Point], color: Color, width: u32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        self.apply_stroke(color, width);
        self.ctx.move_to(first.x as f64, first.y as f64);
        if rest.is_empty() {
            // Zero-length segment; the round cap turns it into a dot.
            self.ctx.line_to(first.x as f64, first.y as f64);
        }
        for point in rest {
            self.ctx.line_to(point.x as f64, point.y as f64);
        }
        let _ = self.ctx.stroke();
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, width: u32) {
        self.apply_stroke(color, width);
        self.ctx.rectangle(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        let _ = self.ctx.stroke();
    }

    fn draw_line(&mut self, start: Point, end: Point, color: Color, width: u32) {
        self.apply_stroke(color, width);
        self.ctx.move_to(start.x as f64, start.y as f64);
        self.ctx.line_to(end.x as f64, end.y as f64);
        let _ = self.ctx.stroke();
    }

    fn draw_ellipse(&mut self, rect: Rect, color: Color, width: u32) {
        // A flat box cannot be scaled into a circle; draw the segment it collapses to.
        if rect.is_degenerate() {
            self.draw_line(rect.min(), rect.max(), color, width);
            return;
        }

        self.apply_stroke(color, width);
        let rx = rect.width as f64 / 2.0;
        let ry = rect.height as f64 / 2.0;

        let _ = self.ctx.save();
        self.ctx.translate(rect.x as f64 + rx, rect.y as f64 + ry);
        self.ctx.scale(rx, ry);
        self.ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
        let _ = self.ctx.restore();

        let _ = self.ctx.stroke();
    }
}

/// Painter that records calls instead of drawing, for dispatch and ordering tests.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum PaintCall {
        Fill(Color),
        Raster { width: i32, height: i32 },
        Path { points: Vec<Point>, color: Color, width: u32 },
        Rect { rect: Rect, color: Color, width: u32 },
        Line { start: Point, end: Point, color: Color, width: u32 },
        Ellipse { rect: Rect, color: Color, width: u32 },
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingPainter {
        pub calls: Vec<PaintCall>,
    }

    impl Painter for RecordingPainter {
        fn fill(&mut self, color: Color) {
            self.calls.push(PaintCall::Fill(color));
        }

        fn draw_raster(&mut self, _raster: &Raster, width: i32, height: i32) {
            self.calls.push(PaintCall::Raster { width, height });
        }

        fn draw_path(&mut self, points: &[Point], color: Color, width: u32) {
            self.calls.push(PaintCall::Path {
                points: points.to_vec(),
                color,
                width,
            });
        }

        fn draw_rect(&mut self, rect: Rect, color: Color, width: u32) {
            self.calls.push(PaintCall::Rect { rect, color, width });
        }

        fn draw_line(&mut self, start: Point, end: Point, color: Color, width: u32) {
            self.calls.push(PaintCall::Line {
                start,
                end,
                color,
                width,
            });
        }

        fn draw_ellipse(&mut self, rect: Rect, color: Color, width: u32) {
            self.calls.push(PaintCall::Ellipse { rect, color, width });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};
    use cairo::{Context, Format, ImageSurface};

    fn render_to_bytes(width: i32, height: i32, draw: impl FnOnce(&mut CairoPainter<'_>)) -> Vec<u8> {
        let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            let mut painter = CairoPainter::new(&ctx);
            painter.fill(WHITE);
            draw(&mut painter);
        }
        let mut bytes = Vec::new();
        surface.with_data(|data| bytes.extend_from_slice(data)).unwrap();
        bytes
    }

    fn blank(width: i32, height: i32) -> Vec<u8> {
        render_to_bytes(width, height, |_| {})
    }

    #[test]
    fn single_point_path_renders_a_dot() {
        let dot = render_to_bytes(20, 20, |p| p.draw_path(&[Point::new(10, 10)], BLACK, 5));
        assert_ne!(dot, blank(20, 20));
    }

    #[test]
    fn empty_path_draws_nothing() {
        let nothing = render_to_bytes(20, 20, |p| p.draw_path(&[], BLACK, 5));
        assert_eq!(nothing, blank(20, 20));
    }

    #[test]
    fn ellipse_with_flat_box_does_not_poison_context() {
        let flat = Rect::from_corners(Point::new(2, 10), Point::new(18, 10));
        let drawn = render_to_bytes(20, 20, |p| {
            p.draw_ellipse(flat, RED, 3);
            // Later strokes still land after the degenerate ellipse.
            p.draw_line(Point::new(0, 0), Point::new(19, 19), BLACK, 2);
        });
        let line_only = render_to_bytes(20, 20, |p| {
            p.draw_line(Point::new(0, 0), Point::new(19, 19), BLACK, 2);
        });
        assert_ne!(drawn, line_only);
        assert_ne!(line_only, blank(20, 20));
    }

    #[test]
    fn rectangle_outline_leaves_interior_untouched() {
        let rect = Rect::from_corners(Point::new(4, 4), Point::new(36, 36));
        let bytes = render_to_bytes(40, 40, |p| p.draw_rect(rect, BLACK, 2));
        let stride = 40 * 4;
        let center = 20 * stride + 20 * 4;
        assert_eq!(&bytes[center..center + 4], &[255, 255, 255, 255]);
        let edge = 4 * stride + 20 * 4;
        assert_ne!(&bytes[edge..edge + 4], &[255, 255, 255, 255]);
    }
}
