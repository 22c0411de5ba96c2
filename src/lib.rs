//! Library exports for the sketchboard drawing core.
//!
//! The shape model, the drawing surface and its toolbar actions are exposed
//! here so that windowed front ends and the headless script runner share the
//! same event handling and rendering code.

pub mod app;
pub mod config;
pub mod draw;
pub mod input;
pub mod raster;
pub mod script;
pub mod surface;
pub mod util;

pub use config::Config;
pub use surface::DrawingSurface;
