//! CLI command implementations.

pub mod chat;
pub mod config;
pub mod emote;

use anyhow::{Context, Result};
use imgify_providers::EmoteResolver;
use tracing::debug;

use crate::Cli;
use crate::config::AppConfig;

/// Loads the config file named on the command line (or the default one) and
/// applies environment overrides.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = AppConfig::load(cli.config.as_deref())?.with_env();
    Ok(config)
}

/// Builds a resolver from configuration.
pub fn build_resolver(config: &AppConfig) -> Result<EmoteResolver> {
    let (client_id, client_secret) = config.client_credentials()?;

    let mut builder = EmoteResolver::builder()
        .client_credentials(client_id, client_secret)
        .endpoints(config.endpoints.clone())
        .timeout(config.timeout());
    if let Some(token) = config.twitch.access_token.as_deref() {
        builder = builder.access_token(token);
    }

    let resolver = builder.build().context("Failed to initialize resolver")?;
    debug!(?resolver, "Resolver ready");
    Ok(resolver)
}
