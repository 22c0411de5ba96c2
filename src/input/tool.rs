//! Drawing mode selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing mode selection.
///
/// The active mode determines what shape is committed when a gesture ends.
/// The mode is read at pointer-up, so switching modes mid-gesture changes the
/// kind of the committed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Freehand drawing - follows the pointer path
    #[default]
    Freeform,
    /// Rectangle outline - from corner to corner
    Rectangle,
    /// Straight line - between start and end points
    Line,
    /// Ellipse outline inscribed in the dragged box
    #[serde(alias = "circle")]
    Ellipse,
}

impl Mode {
    /// All modes in toolbar order.
    pub const ALL: [Mode; 4] = [Mode::Freeform, Mode::Rectangle, Mode::Line, Mode::Ellipse];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Freeform => "Freeform",
            Mode::Rectangle => "Rectangle",
            Mode::Line => "Line",
            Mode::Ellipse => "Ellipse",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "freeform" | "pen" | "freehand" => Ok(Mode::Freeform),
            "rectangle" | "rect" => Ok(Mode::Rectangle),
            "line" => Ok(Mode::Line),
            "ellipse" | "circle" => Ok(Mode::Ellipse),
            other => {
                let expected: Vec<String> = Mode::ALL
                    .iter()
                    .map(|mode| mode.label().to_lowercase())
                    .collect();
                Err(format!(
                    "unknown mode '{other}' (expected one of: {})",
                    expected.join(", ")
                ))
            }
        }
    }
}
