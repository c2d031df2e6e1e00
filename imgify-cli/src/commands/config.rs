//! Config command - inspect configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use imgify_fetch::AdapterInfo;
use imgify_providers::ProviderRegistry;
use serde::Serialize;

use super::load_config;
use crate::config::AppConfig;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands.
#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Show the effective configuration with secrets masked (default).
    Show,

    /// Show the configuration file path.
    Path,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_path(cli),
    }
}

/// JSON shape of `config show`.
#[derive(Serialize)]
struct ConfigOutput<'a> {
    config: &'a AppConfig,
    providers: Vec<AdapterInfo>,
}

fn config_path(cli: &Cli) -> String {
    cli.config
        .clone()
        .unwrap_or_else(AppConfig::default_path)
        .display()
        .to_string()
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?.masked();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_config(&config, &config_path(cli)));
            if let Err(e) = config.client_credentials() {
                println!();
                println!("Warning: {e}");
            }
        }
        OutputFormat::Json => {
            let output = ConfigOutput {
                config: &config,
                providers: ProviderRegistry::info(),
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    match cli.format {
        OutputFormat::Text => println!("{path}"),
        OutputFormat::Json => {
            let paths = serde_json::json!({ "config_file": path });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(())
}
