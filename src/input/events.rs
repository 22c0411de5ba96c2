//! Generic pointer event types delivered by the host.

use crate::util::Point;

/// A single pointer event in surface-local coordinates.
///
/// Hosts map their native button/motion events to these values; only one
/// active pointer is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down(Point),
    /// Pointer moved (with or without the button held)
    Move(Point),
    /// Primary button released
    Up(Point),
}
