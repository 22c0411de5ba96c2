use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use sketchboard::app::{ActionOutcome, PaintApp};
use sketchboard::config::Config;
use sketchboard::input::Mode;
use sketchboard::script::{Script, ScriptReport, ScriptRunner};
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SKETCHBOARD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Shape-based drawing canvas: replay gesture scripts and export the result"
)]
struct Cli {
    /// Gesture script (TOML) to replay against the canvas
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Image to load as the background before the script runs
    #[arg(long, short = 'b', value_name = "IMAGE")]
    background: Option<PathBuf>,

    /// Export the finished canvas to this file (png, jpg or bmp)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Canvas width in pixels (overrides the config)
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the config)
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// Initial drawing mode (freeform, rectangle, line or ellipse)
    #[arg(long, short = 'm', value_name = "MODE")]
    mode: Option<Mode>,

    /// Print the committed shapes as JSON when done
    #[arg(long, action = ArgAction::SetTrue)]
    dump_scene: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if cli.script.is_none() && cli.output.is_none() && !cli.dump_scene {
        print_usage();
        return Ok(());
    }

    let mut app = PaintApp::headless(&config);

    if let Some(background) = &cli.background
        && let ActionOutcome::Failed(message) = app.load_image_from(background)
    {
        bail!(
            "Failed to load background {}: {}",
            background.display(),
            message
        );
    }

    let report = match &cli.script {
        Some(path) => run_script(&mut app, path)?,
        None => ScriptReport::default(),
    };

    if let Some(output) = &cli.output
        && let ActionOutcome::Failed(message) =
            app.save_image_to(output, Some(config.export.format))
    {
        bail!("Failed to export {}: {}", output.display(), message);
    }

    if cli.dump_scene {
        println!("{}", serde_json::to_string_pretty(app.surface().scene())?);
    }

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!(
                "step {} ({}): {}",
                failure.index + 1,
                failure.action,
                failure.message
            );
        }
        bail!(
            "{} of {} script steps failed",
            report.failures.len(),
            report.steps_run
        );
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().context("Failed to load configuration")?,
    };

    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    if let Some(mode) = cli.mode {
        config.drawing.default_mode = mode;
    }
    config.validate_and_clamp();

    Ok(config)
}

fn run_script(app: &mut PaintApp, path: &Path) -> anyhow::Result<ScriptReport> {
    let script = Script::load(path)?;
    let base_dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    log::info!("Replaying {} steps from {}", script.steps.len(), path.display());
    Ok(ScriptRunner::new(app, base_dir).run(&script))
}

fn print_usage() {
    println!("sketchboard: Shape-based drawing canvas");
    println!();
    println!("Usage:");
    println!("  sketchboard --script FILE [--output FILE]   Replay a gesture script");
    println!("  sketchboard --background IMAGE --output FILE  Convert an image through the canvas");
    println!("  sketchboard --print-config                  Show the effective configuration");
    println!("  sketchboard --help                          Show all options");
    println!();
    println!("Script steps (TOML, [[steps]] with an `action` key):");
    println!("  down / move / up (x, y), drag (points), mode, color, width, pen-size,");
    println!("  clear, clear-shapes, clear-all, background (path), export (path), resize");
    println!();
    println!("Configuration:");
    println!("  ~/.config/sketchboard/config.toml");
}
