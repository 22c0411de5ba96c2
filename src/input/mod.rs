//! Input vocabulary for the drawing surface.
//!
//! Pointer events arrive from the host as [`PointerEvent`]s and the active
//! drawing [`Mode`] decides which shape a gesture produces.

pub mod events;
pub mod tool;

pub use events::PointerEvent;
pub use tool::Mode;
