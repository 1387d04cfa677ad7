//! # Vix - A Small Modal Text Editor
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the editor (prompts for a file name)
//! cargo run
//!
//! # Run with a file
//! cargo run -- path/to/file.c
//!
//! # Log to a file while editing
//! cargo run -- notes.txt --log-file vix.log -vv
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vix_core::Config;
use vix_tui::{Flags, run};

/// Vix - a small modal text editor
#[derive(Parser, Debug)]
#[command(name = "vix")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Exit status after Ctrl-C, as for SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(&args)?;

    tracing::info!("Starting vix v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };

    let flags = Flags {
        file: args.file,
        config,
    };

    // Run the application
    match run(flags) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            tracing::info!("Interrupted");
            std::process::exit(EXIT_INTERRUPTED);
        }
        Err(e) => Err(anyhow::anyhow!("Terminal error: {}", e)),
    }
}

/// Installs the tracing subscriber.
///
/// The screen belongs to the editor, so verbose output needs `--log-file`;
/// without one only warnings and errors reach stderr.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let log_level = match (&args.log_file, args.verbose) {
        (None, _) | (Some(_), 0) => "warn",
        (Some(_), 1) => "info",
        (Some(_), 2) => "debug",
        (Some(_), _) => "trace",
    };
    let filter = EnvFilter::try_from_env("VIX_LOG").unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match &args.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false)
                        .with_level(true),
                )
                .init();
        }
        None => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true),
                )
                .init();
        }
    }
    Ok(())
}
