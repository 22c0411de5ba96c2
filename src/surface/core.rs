//! Drawing surface state: scene, tool settings and the in-progress gesture.

use crate::config::{ClearBehavior, Config};
use crate::draw::{Color, Scene, color::*};
use crate::input::Mode;
use crate::raster::Raster;
use crate::util::Point;

/// Surface width used when no configuration says otherwise.
pub const DEFAULT_WIDTH: i32 = 800;
/// Surface height used when no configuration says otherwise.
pub const DEFAULT_HEIGHT: i32 = 600;
/// Largest width or height a surface may have.
pub const MAX_SIDE: i32 = 16384;
/// Pen width used when no configuration says otherwise.
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// Settings applied to the next committed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    /// Kind of shape a gesture commits (read at pointer-up)
    pub mode: Mode,
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels, never zero
    pub stroke_width: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            mode: Mode::Freeform,
            color: BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Gesture state machine.
///
/// Tracks whether the pointer is idle or dragging out a shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress - nothing to preview
    #[default]
    Idle,
    /// Pointer is held down
    Drawing {
        /// Where the pointer went down
        start: Point,
        /// Latest pointer position
        end: Point,
        /// Positions recorded while in freeform mode, oldest first
        points: Option<Vec<Point>>,
    },
}

/// The drawing surface.
///
/// Owns everything a redraw needs: the committed scene, the tool settings,
/// the gesture in progress and the optional background raster. Pointer
/// events and mutators change this state and raise the redraw hint; painting
/// only reads it.
#[derive(Debug)]
pub struct DrawingSurface {
    /// Committed shapes in paint order
    pub(super) scene: Scene,
    /// Current mode, color and stroke width
    pub(super) tool: ToolState,
    /// Gesture in progress, if any
    pub(super) gesture: GestureState,
    /// Image stretched under the shapes
    pub(super) background: Option<Raster>,
    /// Fill painted before anything else
    pub(super) canvas_color: Color,
    /// What `clear` removes
    pub(super) clear_behavior: ClearBehavior,
    /// Surface bounds used for painting and export
    pub(super) width: i32,
    pub(super) height: i32,
    /// Whether the host should repaint
    pub(super) needs_redraw: bool,
}

impl DrawingSurface {
    /// Creates an empty 800x600 surface with the stock tool settings
    /// (freeform, black, width 2) on a white canvas.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            tool: ToolState::default(),
            gesture: GestureState::Idle,
            background: None,
            canvas_color: WHITE,
            clear_behavior: ClearBehavior::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            needs_redraw: true,
        }
    }

    /// Creates an empty surface using the configured defaults.
    pub fn from_config(config: &Config) -> Self {
        let tool = ToolState {
            mode: config.drawing.default_mode,
            color: config.drawing.default_color.to_color(),
            stroke_width: config.drawing.default_stroke_width.max(1),
        };

        log::debug!(
            "Surface {}x{}, tool {} {:?} width {}",
            config.canvas.width,
            config.canvas.height,
            tool.mode,
            tool.color,
            tool.stroke_width
        );

        Self {
            tool,
            canvas_color: config.canvas.background_color.to_color(),
            clear_behavior: config.canvas.clear_behavior,
            width: clamp_side(config.canvas.width),
            height: clamp_side(config.canvas.height),
            ..Self::new()
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tool(&self) -> ToolState {
        self.tool
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Returns true while a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.gesture, GestureState::Drawing { .. })
    }

    pub fn background(&self) -> Option<&Raster> {
        self.background.as_ref()
    }

    pub fn canvas_color(&self) -> Color {
        self.canvas_color
    }

    pub fn clear_behavior(&self) -> ClearBehavior {
        self.clear_behavior
    }

    /// Current bounds as `(width, height)`.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Returns whether a repaint is pending without clearing it.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns and clears the pending repaint hint.
    ///
    /// Hosts call this once per frame, so any number of changes between two
    /// frames collapse into a single repaint.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

/// Converts a configured side length, capping it at [`MAX_SIDE`].
pub(super) fn clamp_side(side: u32) -> i32 {
    i32::try_from(side).map_or(MAX_SIDE, |side| side.min(MAX_SIDE))
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new()
    }
}
