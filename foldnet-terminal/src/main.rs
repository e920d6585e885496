/// foldnet: fold and unfold box nets in the terminal.
///
/// # Logging
///
/// The viewer owns the terminal, so logs only go to a file:
///
/// ```bash
/// RUST_LOG=foldnet_core=debug foldnet --log-file foldnet.log
/// ```
///
/// # Example
///
/// ```bash
/// # Open the stairs net fully flat
/// foldnet --pattern NET_10 --progress 1
///
/// # Print face placements instead of opening the viewer
/// foldnet --pattern 6 --progress 0 --summary
/// ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use foldnet_core::{LabelStyle, NetPattern, SceneConfig, ShapeKind};
use foldnet_terminal::{scene_summary, TerminalApp};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// foldnet - Fold a box along any of its eleven nets.
#[derive(Parser)]
#[command(name = "foldnet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scene configuration file (TOML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Net to show: NET_1 to NET_11, or just the number
    #[arg(long, short)]
    pattern: Option<NetPattern>,

    /// Shape to fold
    #[arg(long, short)]
    shape: Option<ShapeArg>,

    /// Fold progress, 0 closed to 1 flat
    #[arg(long)]
    progress: Option<f32>,

    /// Face labels: numbers, letters, roman or blank
    #[arg(long)]
    labels: Option<LabelStyle>,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the folded scene and exit
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Cube,
    Prism,
}

impl From<ShapeArg> for ShapeKind {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Cube => ShapeKind::Cube,
            ShapeArg::Prism => ShapeKind::RectangularPrism,
        }
    }
}

/// Send logs to `path`, or nowhere.
fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<SceneConfig> {
    let mut config = match &cli.config {
        Some(path) => SceneConfig::from_toml_file(path)?,
        None => SceneConfig::default(),
    };

    // Shape before pattern: both reset dimensions, and the pattern preset wins.
    if let Some(shape) = cli.shape {
        config.select_shape(shape.into());
    }
    if let Some(pattern) = cli.pattern {
        config.select_pattern(pattern);
    }
    if let Some(progress) = cli.progress {
        config.set_progress(progress);
    }
    if let Some(labels) = cli.labels {
        config.label_style = labels;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    info!(pattern = %config.pattern, progress = config.progress.value(), "configuration ready");

    if cli.summary {
        println!("{}", scene_summary(&config.build_scene()));
        if let Some(readout) = config.readout() {
            println!("{}: {}", readout.title, readout.line());
        }
        return Ok(());
    }

    let mut app = TerminalApp::new(config).context("failed to query terminal size")?;
    app.run().context("terminal viewer failed")?;
    Ok(())
}
