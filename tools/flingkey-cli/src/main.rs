//! Flingkey CLI — classify swipes and replay recorded touch traces.
//!
//! Usage:
//!   flingkey classify [OPTIONS]    Classify a single fling
//!   flingkey replay <TRACE>        Classify every stroke in a touch trace
//!   flingkey config [--init]       Show or initialize configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use flingkey_common::config::{AppConfig, LoggingConfig};

mod commands;

use commands::ThresholdArgs;

#[derive(Parser)]
#[command(
    name = "flingkey",
    about = "Swipe gesture classification for touch keyboards",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/flingkey/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single fling from its down/release positions and velocity
    Classify {
        /// Touch-down X (px)
        #[arg(long, allow_negative_numbers = true)]
        down_x: f64,

        /// Touch-down Y (px)
        #[arg(long, allow_negative_numbers = true)]
        down_y: f64,

        /// Release X (px)
        #[arg(long, allow_negative_numbers = true)]
        up_x: f64,

        /// Release Y (px)
        #[arg(long, allow_negative_numbers = true)]
        up_y: f64,

        /// Horizontal release velocity (px/s, positive = rightward)
        #[arg(long, allow_negative_numbers = true)]
        vx: f64,

        /// Vertical release velocity (px/s, positive = downward)
        #[arg(long, allow_negative_numbers = true)]
        vy: f64,

        /// Key layout JSON used to resolve the key under the touch-down point
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Segment a touch trace into strokes and classify each one
    Replay {
        /// Path to the JSONL touch trace
        trace: PathBuf,

        /// Key layout JSON used to resolve the key under each touch-down point
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Velocity estimation window (ms)
        #[arg(long)]
        velocity_horizon_ms: Option<u64>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file when initializing
        #[arg(long, requires = "init")]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, load_error) = match &cli.config {
        Some(path)
            if !path.exists() && matches!(cli.command, Commands::Config { init: true, .. }) =>
        {
            (AppConfig::default(), None)
        }
        Some(path) => (
            AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
            None,
        ),
        None => AppConfig::load_or_default(),
    };

    // Initialize logging
    let logging = if cli.verbose {
        LoggingConfig {
            level: "debug".to_string(),
            ..config.logging.clone()
        }
    } else {
        config.logging.clone()
    };
    flingkey_common::logging::init_logging(&logging);

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Ignoring unreadable config, using defaults");
    }

    match cli.command {
        Commands::Classify {
            down_x,
            down_y,
            up_x,
            up_y,
            vx,
            vy,
            layout,
            json,
            thresholds,
        } => commands::classify::run(
            &config,
            &thresholds,
            (down_x, down_y),
            (up_x, up_y),
            (vx, vy),
            layout,
            json,
        ),
        Commands::Replay {
            trace,
            layout,
            velocity_horizon_ms,
            json,
            thresholds,
        } => commands::replay::run(
            &config,
            &thresholds,
            trace,
            layout,
            velocity_horizon_ms,
            json,
        ),
        Commands::Config { init, force } => {
            commands::config::run(&config, cli.config, init, force)
        }
    }
}
