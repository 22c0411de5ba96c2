//! Shape model and rendering primitives (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: the four committed shape kinds (freeform, rectangle, line, ellipse)
//! - [`Scene`]: append-only container for all committed shapes
//! - [`Painter`]: the drawing capability shapes are dispatched onto, with a
//!   Cairo implementation in [`CairoPainter`]

pub mod color;
pub mod painter;
pub mod render;
pub mod scene;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use painter::{CairoPainter, Painter};
pub use render::{render_shape, render_shapes};
pub use scene::Scene;
pub use shape::Shape;

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
