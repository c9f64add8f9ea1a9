use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use panelcam_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "panelcam")]
#[command(author, version, about = "Read panel comics one frame at a time")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewer
    Run {
        /// Cell layout file or URL (overrides the configured source)
        #[arg(short, long)]
        cells: Option<String>,
        /// Frame to start at instead of the remembered one
        #[arg(short, long)]
        frame: Option<usize>,
    },
    /// Print the keyframe path and the scale of each frame
    Path {
        #[arg(short, long)]
        cells: Option<String>,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 1000.0)]
        width: f64,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    let command = cli.command.unwrap_or(Commands::Run {
        cells: None,
        frame: None,
    });
    init_logging(&config, matches!(command, Commands::Run { .. }))?;

    match command {
        Commands::Run { cells, frame } => {
            if let Some(location) = cells {
                config.source.location = location;
            }
            commands::run::run(config, frame).await
        }
        Commands::Path {
            cells,
            width,
            height,
            json,
        } => {
            if let Some(location) = cells {
                config.source.location = location;
            }
            commands::path::run(&config, width, height, json).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

/// Log to stderr, or to the log file while the terminal UI owns the screen
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
    }

    Ok(())
}
