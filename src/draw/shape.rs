//! Shape definitions for committed drawings.

use super::color::Color;
use crate::input::Mode;
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Represents a committed drawable shape.
///
/// Each variant corresponds to one drawing mode. All shapes store their own
/// color and stroke width, captured at commit time, so later tool changes
/// never affect them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Shape {
    /// Freehand drawing - open polyline through the pointer positions
    Freeform {
        /// Positions in chronological order (never empty)
        points: Vec<Point>,
        /// Stroke color
        color: Color,
        /// Stroke width in pixels
        width: u32,
    },
    /// Rectangle outline spanned by two opposite corners
    Rectangle {
        /// Corner where the drag started
        start: Point,
        /// Opposite corner where the drag ended
        end: Point,
        /// Border color
        color: Color,
        /// Border width in pixels
        width: u32,
    },
    /// Straight line between two points
    Line {
        start: Point,
        end: Point,
        color: Color,
        width: u32,
    },
    /// Ellipse inscribed in the box spanned by two opposite corners
    Ellipse {
        /// Corner where the drag started
        start: Point,
        /// Opposite corner where the drag ended
        end: Point,
        /// Outline color
        color: Color,
        /// Outline width in pixels
        width: u32,
    },
}

impl Shape {
    /// Builds the shape a gesture produces in `mode`.
    ///
    /// `points` is only consulted for [`Mode::Freeform`]; when it is empty the
    /// stroke falls back to the gesture's start and end positions.
    pub fn from_gesture(
        mode: Mode,
        start: Point,
        end: Point,
        points: Vec<Point>,
        color: Color,
        width: u32,
    ) -> Self {
        match mode {
            Mode::Freeform => {
                let points = if points.is_empty() {
                    let mut fallback = vec![start];
                    if end != start {
                        fallback.push(end);
                    }
                    fallback
                } else {
                    points
                };
                Shape::Freeform {
                    points,
                    color,
                    width,
                }
            }
            Mode::Rectangle => Shape::Rectangle {
                start,
                end,
                color,
                width,
            },
            Mode::Line => Shape::Line {
                start,
                end,
                color,
                width,
            },
            Mode::Ellipse => Shape::Ellipse {
                start,
                end,
                color,
                width,
            },
        }
    }

    /// Returns the drawing mode that produces this kind of shape.
    pub fn kind(&self) -> Mode {
        match self {
            Shape::Freeform { .. } => Mode::Freeform,
            Shape::Rectangle { .. } => Mode::Rectangle,
            Shape::Line { .. } => Mode::Line,
            Shape::Ellipse { .. } => Mode::Ellipse,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Freeform { color, .. }
            | Shape::Rectangle { color, .. }
            | Shape::Line { color, .. }
            | Shape::Ellipse { color, .. } => *color,
        }
    }

    /// Stroke width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Shape::Freeform { width, .. }
            | Shape::Rectangle { width, .. }
            | Shape::Line { width, .. }
            | Shape::Ellipse { width, .. } => *width,
        }
    }

    /// Returns the normalized box for box-shaped variants (Rectangle, Ellipse).
    pub fn normalized_box(&self) -> Option<Rect> {
        match self {
            Shape::Rectangle { start, end, .. } | Shape::Ellipse { start, end, .. } => {
                Some(Rect::from_corners(*start, *end))
            }
            Shape::Freeform { .. } | Shape::Line { .. } => None,
        }
    }
}
