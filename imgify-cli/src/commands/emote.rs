//! Emote commands - resolve a single emote.

use anyhow::Result;
use clap::Args;
use imgify_providers::EmoteRequest;
use tracing::info;

use super::{build_resolver, load_config};
use crate::output::{JsonFormatter, Reply, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the emote command.
#[derive(Args)]
pub struct EmoteArgs {
    /// Channel login (e.g. cohhcarnage).
    pub channel: String,

    /// Emote name, case-insensitive.
    pub emote: String,
}

/// Arguments for the global command.
#[derive(Args)]
pub struct GlobalArgs {
    /// Emote name, case-insensitive.
    pub emote: String,
}

/// Runs the emote command.
pub async fn run(args: &EmoteArgs, cli: &Cli) -> Result<()> {
    resolve_and_print(EmoteRequest::channel(&args.channel, &args.emote), cli).await
}

/// Runs the global command.
pub async fn run_global(args: &GlobalArgs, cli: &Cli) -> Result<()> {
    resolve_and_print(EmoteRequest::global(&args.emote), cli).await
}

async fn resolve_and_print(request: EmoteRequest, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let resolver = build_resolver(&config)?;

    info!(emote = %request.emote(), "Resolving emote");
    let resolution = resolver.resolve(&request).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!(
                "{}",
                formatter.format_reply(&Reply::from_match(resolution.result()))
            );
            if cli.verbose {
                println!("{}", formatter.format_attempts(&resolution.outcome));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_resolution(&resolution)?);
        }
    }

    Ok(())
}
