#![deny(unsafe_code)]

//! svcstate CLI — replay daemon event streams through the status reducer.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use svcstate_config::AppConfig;
use svcstate_core::{Event, StatusReducer, decode_stream};

/// svcstate — track daemon and service status from a message stream.
#[derive(Parser)]
#[command(name = "svcstate", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "svcstate.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold a newline-delimited JSON event stream and print the final status.
    Replay {
        /// Event file, or `-` for stdin.
        input: PathBuf,

        /// Print every intermediate snapshot as one JSON line.
        #[arg(long)]
        trace: bool,
    },

    /// Print the initial status snapshot for the configured daemon host.
    StatusTemplate,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config).await?;

    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Replay { input, trace } => cmd_replay(&config, &input, trace)?,
        Commands::StatusTemplate => cmd_status_template(&config)?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
    }

    Ok(())
}

fn cmd_replay(config: &AppConfig, input: &Path, trace: bool) -> Result<()> {
    let reader: Box<dyn BufRead> = if input == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(input)
            .with_context(|| format!("failed to open event file '{}'", input.display()))?;
        Box::new(BufReader::new(file))
    };

    let events = decode_stream(reader)?;
    info!(count = events.len(), "Replaying events");

    let reducer = StatusReducer::from_config(config);
    write_replay(&reducer, &events, trace, &mut io::stdout().lock())
}

/// Fold `events` and write either every snapshot (one JSON line each) or
/// only the final one (pretty JSON).
fn write_replay<W: Write>(
    reducer: &StatusReducer,
    events: &[Event],
    trace: bool,
    out: &mut W,
) -> Result<()> {
    let mut status = reducer.initial().clone();
    for event in events {
        status = reducer.apply(&status, event);
        debug!(kind = event.kind(), %status, "applied");
        if trace {
            writeln!(out, "{}", serde_json::to_string(&status)?)?;
        }
    }

    if !trace {
        writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?;
    }
    Ok(())
}

fn cmd_status_template(config: &AppConfig) -> Result<()> {
    let reducer = StatusReducer::from_config(config);
    println!("{}", serde_json::to_string_pretty(reducer.initial())?);
    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str =
            toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {e}"))?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

async fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::load(path)
            .await
            .with_context(|| format!("failed to load config '{}'", path.display()))
    } else {
        Ok(AppConfig::default())
    }
}
