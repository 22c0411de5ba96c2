//! Shape-to-primitive dispatch.

use super::painter::Painter;
use super::shape::Shape;
use crate::util::Rect;

/// Renders all shapes in order.
///
/// Shapes are drawn in the order they appear (first shape = bottom layer).
pub fn render_shapes<P: Painter + ?Sized>(painter: &mut P, shapes: &[Shape]) {
    for shape in shapes {
        render_shape(painter, shape);
    }
}

/// Renders a single shape as exactly one painter primitive.
///
/// The match is exhaustive, so a new shape kind does not compile until it is
/// given a primitive here.
pub fn render_shape<P: Painter + ?Sized>(painter: &mut P, shape: &Shape) {
    match shape {
        Shape::Freeform {
            points,
            color,
            width,
        } => painter.draw_path(points, *color, *width),
        Shape::Rectangle {
            start,
            end,
            color,
            width,
        } => painter.draw_rect(Rect::from_corners(*start, *end), *color, *width),
        Shape::Line {
            start,
            end,
            color,
            width,
        } => painter.draw_line(*start, *end, *color, *width),
        Shape::Ellipse {
            start,
            end,
            color,
            width,
        } => painter.draw_ellipse(Rect::from_corners(*start, *end), *color, *width),
    }
}
