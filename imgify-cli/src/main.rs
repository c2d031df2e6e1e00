// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Emote Imgify CLI - turn chat emote names into image URLs.
//!
//! # Examples
//!
//! ```bash
//! # Emote from a broadcaster's channel (Twitch, then BetterTTV, then FrankerFaceZ)
//! imgify emote cohhcarnage cohhLUL
//!
//! # Platform-wide emote
//! imgify global Kappa
//!
//! # Show which providers were asked
//! imgify global Kappa --verbose
//!
//! # JSON output
//! imgify emote forsen forsenE --format json --pretty
//!
//! # Answer chat commands piped in on stdin
//! tail -f chat.log | imgify chat
//!
//! # Inspect configuration (secrets masked)
//! imgify config
//! ```

mod chat;
mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use imgify_providers::{BuildError, ResolveError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{chat as chat_cmd, config as config_cmd, emote};

// ============================================================================
// CLI Definition
// ============================================================================

/// Emote Imgify CLI - emote name to image URL.
#[derive(Parser)]
#[command(name = "imgify")]
#[command(about = "Resolve chat emote names into image URLs")]
#[command(long_about = r#"
Emote Imgify looks an emote name up across emote hosts and prints the URL
of the first match.

Providers, in lookup order:
  • Twitch (twitch)
  • BetterTTV (bttv)
  • FrankerFaceZ (ffz)

Requires a Twitch application client id and secret, from the config file
or the TWITCH_CLIENT_ID / TWITCH_CLIENT_SECRET environment variables.

Examples:
  imgify emote cohhcarnage cohhLUL   # Channel emote
  imgify global Kappa                # Global emote
  imgify chat                        # Answer ^emote / ^global lines on stdin
  imgify config                      # Effective configuration
"#)]
#[command(version)]
#[command(author = "Emote Imgify Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the platform config dir).
    #[arg(id = "config_file", long = "config", short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info and provider attempts).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error messages).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an emote in a broadcaster's channel.
    #[command(visible_alias = "e")]
    Emote(emote::EmoteArgs),

    /// Resolve a global emote.
    #[command(visible_alias = "g")]
    Global(emote::GlobalArgs),

    /// Answer chat commands read from stdin.
    Chat(chat_cmd::ChatArgs),

    /// Inspect configuration.
    Config(config_cmd::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success, including "emote cannot be found".
    Success = 0,
    /// General error.
    Error = 1,
    /// The channel does not exist.
    ChannelNotFound = 2,
    /// Twitch rejected the app credentials.
    AuthFailure = 3,
}

impl ExitCode {
    /// Exit code for an error returned by a command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<ResolveError>() {
            return match err {
                ResolveError::ChannelNotFound(_) => Self::ChannelNotFound,
                ResolveError::Auth(_) => Self::AuthFailure,
                ResolveError::ChannelLookup(_) => Self::Error,
            };
        }
        if let Some(BuildError::Auth(_)) = err.downcast_ref::<BuildError>() {
            return Self::AuthFailure;
        }
        Self::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("imgify=debug,info")
    } else {
        EnvFilter::new("imgify=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result: Result<()> = match &cli.command {
        Commands::Emote(args) => emote::run(args, &cli).await,
        Commands::Global(args) => emote::run_global(args, &cli).await,
        Commands::Chat(args) => chat_cmd::run(args, &cli).await,
        Commands::Config(args) => config_cmd::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }
}
