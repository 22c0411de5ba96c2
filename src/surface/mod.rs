//! The interactive drawing surface.
//!
//! Turns pointer events into committed shapes, keeps the tool settings and
//! background image, and paints committed and in-progress content.

mod actions;
mod core;
mod pointer;
mod render;

pub use self::core::{
    DEFAULT_HEIGHT, DEFAULT_STROKE_WIDTH, DEFAULT_WIDTH, DrawingSurface, GestureState, MAX_SIDE,
    ToolState,
};
