//! Gesture scripts: replay pointer input and toolbar actions without a window.
//!
//! A script is a TOML document with an optional `[canvas]` table and a list of
//! `[[steps]]`, each tagged by `action`:
//!
//! ```toml
//! [canvas]
//! width = 200
//! height = 120
//!
//! [[steps]]
//! action = "mode"
//! mode = "rectangle"
//!
//! [[steps]]
//! action = "drag"
//! points = [[10, 10], [60, 40], [100, 60]]
//!
//! [[steps]]
//! action = "export"
//! path = "out.png"
//! ```
//!
//! Relative paths are resolved against the directory holding the script.

use crate::app::{ActionOutcome, PaintApp};
use crate::config::ColorSpec;
use crate::input::{Mode, PointerEvent};
use crate::raster::ExportFormat;
use crate::util::Point;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Canvas size override at the top of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScriptCanvas {
    pub width: u32,
    pub height: u32,
}

/// One scripted input or action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Pointer press
    Down { x: i32, y: i32 },
    /// Pointer motion
    Move { x: i32, y: i32 },
    /// Pointer release
    Up { x: i32, y: i32 },
    /// Press on the first point, move through the middle ones, release on the last
    Drag { points: Vec<[i32; 2]> },
    /// Select a drawing mode
    Mode { mode: Mode },
    /// Set the pen color
    Color { color: ColorSpec },
    /// Set the pen width directly
    Width { width: u32 },
    /// Pick a configured pen size by index
    PenSize { index: usize },
    /// Clear using the configured behavior
    Clear,
    /// Remove shapes, keep the background
    ClearShapes,
    /// Remove shapes and the background
    ClearAll,
    /// Load a background image
    Background { path: PathBuf },
    /// Save the canvas; without a path a name is generated in the export directory
    Export {
        #[serde(default)]
        path: Option<PathBuf>,
        #[serde(default)]
        format: Option<ExportFormat>,
    },
    /// Change the surface size
    Resize { width: i32, height: i32 },
}

impl Step {
    /// The `action` tag this step was written with.
    pub fn action(&self) -> &'static str {
        match self {
            Step::Down { .. } => "down",
            Step::Move { .. } => "move",
            Step::Up { .. } => "up",
            Step::Drag { .. } => "drag",
            Step::Mode { .. } => "mode",
            Step::Color { .. } => "color",
            Step::Width { .. } => "width",
            Step::PenSize { .. } => "pen-size",
            Step::Clear => "clear",
            Step::ClearShapes => "clear-shapes",
            Step::ClearAll => "clear-all",
            Step::Background { .. } => "background",
            Step::Export { .. } => "export",
            Step::Resize { .. } => "resize",
        }
    }
}

/// A parsed gesture script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub canvas: Option<ScriptCanvas>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid gesture script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_toml(&source)
            .with_context(|| format!("Failed to parse script {}", path.display()))?;
        info!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }
}

/// A step that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Zero-based position in the script
    pub index: usize,
    pub action: &'static str,
    pub message: String,
}

/// Summary of a script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub steps_run: usize,
    pub failures: Vec<StepFailure>,
}

impl ScriptReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replays scripts against a [`PaintApp`].
pub struct ScriptRunner<'a> {
    app: &'a mut PaintApp,
    base_dir: PathBuf,
}

impl<'a> ScriptRunner<'a> {
    /// `base_dir` anchors relative paths in `background` and `export` steps.
    pub fn new(app: &'a mut PaintApp, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            app,
            base_dir: base_dir.into(),
        }
    }

    /// Runs every step in order.
    ///
    /// A failing step is logged and recorded; the remaining steps still run.
    pub fn run(&mut self, script: &Script) -> ScriptReport {
        if let Some(canvas) = script.canvas {
            self.app
                .surface_mut()
                .resize(saturating_i32(canvas.width), saturating_i32(canvas.height));
        }

        let mut report = ScriptReport::default();
        for (index, step) in script.steps.iter().enumerate() {
            debug!("Step {}: {:?}", index, step);
            report.steps_run += 1;
            if let Err(err) = self.apply(step) {
                warn!("Step {} ({}) failed: {:#}", index, step.action(), err);
                report.failures.push(StepFailure {
                    index,
                    action: step.action(),
                    message: format!("{err:#}"),
                });
            }
        }

        info!(
            "Script finished: {} steps, {} failed",
            report.steps_run,
            report.failures.len()
        );
        report
    }

    /// Applies a single step.
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Down { x, y } => self.pointer(PointerEvent::Down(Point::new(*x, *y))),
            Step::Move { x, y } => self.pointer(PointerEvent::Move(Point::new(*x, *y))),
            Step::Up { x, y } => self.pointer(PointerEvent::Up(Point::new(*x, *y))),
            Step::Drag { points } => {
                let Some((first, rest)) = points.split_first() else {
                    bail!("drag needs at least one point");
                };
                self.pointer(PointerEvent::Down(Point::from(*first)));
                match rest.split_last() {
                    Some((last, middle)) => {
                        for point in middle {
                            self.pointer(PointerEvent::Move(Point::from(*point)));
                        }
                        self.pointer(PointerEvent::Up(Point::from(*last)));
                    }
                    None => self.pointer(PointerEvent::Up(Point::from(*first))),
                }
            }
            Step::Mode { mode } => check(self.app.select_mode(*mode))?,
            Step::Color { color } => {
                let color = color
                    .try_to_color()
                    .ok_or_else(|| anyhow!("unknown color {color:?}"))?;
                self.app.surface_mut().set_color(color);
            }
            Step::Width { width } => self.app.surface_mut().set_stroke_width(*width),
            Step::PenSize { index } => check(self.app.select_pen_size(*index))?,
            Step::Clear => check(self.app.clear())?,
            Step::ClearShapes => self.app.surface_mut().clear_shapes(),
            Step::ClearAll => self.app.surface_mut().clear_all(),
            Step::Background { path } => {
                let path = self.resolve(path);
                check(self.app.load_image_from(&path))?;
            }
            Step::Export { path, format } => {
                let outcome = match path {
                    Some(path) => {
                        let path = self.resolve(path);
                        self.app.save_image_to(&path, *format)
                    }
                    None => self.app.save_image_to_default(),
                };
                check(outcome)?;
            }
            Step::Resize { width, height } => self.app.surface_mut().resize(*width, *height),
        }
        Ok(())
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.app.surface_mut().handle_pointer(event);
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn check(outcome: ActionOutcome) -> Result<()> {
    match outcome {
        ActionOutcome::Completed => Ok(()),
        ActionOutcome::Cancelled => bail!("cancelled"),
        ActionOutcome::Failed(message) => Err(anyhow!(message)),
    }
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
