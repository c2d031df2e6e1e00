//! Chat command - answer chat lines read from stdin.
//!
//! Each line is treated as one chat message. Lines that are not commands
//! produce no output, so the command can sit behind any gateway that pipes
//! messages in and posts replies back.

use anyhow::Result;
use clap::Args;
use imgify_providers::{EmoteRequest, EmoteResolver};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::{build_resolver, load_config};
use crate::chat;
use crate::output::{JsonFormatter, Reply, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Command prefix (overrides chat.command_prefix).
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Runs the chat command until stdin closes.
pub async fn run(args: &ChatArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let resolver = build_resolver(&config)?;
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| config.chat.command_prefix.clone());

    if config.chat.gateway_token.is_none() {
        debug!("No gateway token configured; replies go to stdout only");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(reply) = handle_line(&resolver, &line, &prefix).await else {
            continue;
        };
        print_reply(&reply, cli)?;
    }

    Ok(())
}

/// Reply for one chat line, or `None` if the line is not a command.
pub async fn handle_line(resolver: &EmoteResolver, line: &str, prefix: &str) -> Option<Reply> {
    let command = match chat::parse(line, prefix)? {
        Ok(command) => command,
        Err(e) => return Some(Reply::from_command_error(&e)),
    };

    let request = EmoteRequest::from(command);
    let reply = match resolver.resolve(&request).await {
        Ok(resolution) => Reply::from_match(resolution.result()),
        Err(e) => {
            warn!(error = %e, "Resolution failed");
            Reply::from_error(&e)
        }
    };
    Some(reply)
}

fn print_reply(reply: &Reply, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_reply(reply));
        }
        OutputFormat::Json => {
            // One object per line regardless of --pretty.
            println!("{}", JsonFormatter::new(false).format_reply(reply)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use imgify_core::{Channel, ChannelId, EmoteMatch, ProviderKind};
    use imgify_fetch::{
        AuthError, ChannelDirectory, CredentialSource, DirectoryError, LookupError,
        ProviderAdapter,
    };
    use reqwest::header::HeaderMap;
    use std::sync::Arc;

    struct Ready;

    #[async_trait]
    impl CredentialSource for Ready {
        async fn ensure_valid(&self) -> Result<(), AuthError> {
            Ok(())
        }

        async fn auth_headers(&self) -> Result<HeaderMap, AuthError> {
            Ok(HeaderMap::new())
        }
    }

    struct OneChannel;

    #[async_trait]
    impl ChannelDirectory for OneChannel {
        async fn resolve(&self, channel_name: &str) -> Result<Channel, DirectoryError> {
            if channel_name.eq_ignore_ascii_case("forsen") {
                Ok(Channel::new("forsen", ChannelId::parse("22484632").unwrap()))
            } else {
                Err(DirectoryError::NotFound(channel_name.to_string()))
            }
        }
    }

    struct Bttv;

    #[async_trait]
    impl ProviderAdapter for Bttv {
        fn kind(&self) -> ProviderKind {
            ProviderKind::BetterTtv
        }

        async fn lookup_channel_emote(
            &self,
            _channel_id: &ChannelId,
            name: &str,
        ) -> Result<EmoteMatch, LookupError> {
            Ok(imgify_core::names_match("forsenE", name)
                .then(|| "https://cdn.betterttv.net/emote/forsenE/3x".to_string())
                .into())
        }

        async fn lookup_global_emote(&self, _name: &str) -> Result<EmoteMatch, LookupError> {
            Ok(EmoteMatch::NotFound)
        }
    }

    fn resolver() -> EmoteResolver {
        EmoteResolver::builder()
            .credentials(Arc::new(Ready))
            .directory(Arc::new(OneChannel))
            .adapters(vec![Arc::new(Bttv) as Arc<dyn ProviderAdapter>])
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_emote_line_replies_with_url() {
        let reply = handle_line(&resolver(), "^emote forsen FORSENE", "^").await;
        assert_eq!(
            reply,
            Some(Reply::permanent("https://cdn.betterttv.net/emote/forsenE/3x"))
        );
    }

    #[tokio::test]
    async fn test_unknown_emote_replies_not_found() {
        let reply = handle_line(&resolver(), "^global nothing", "^").await.unwrap();
        assert_eq!(reply.text, "Emote cannot be found");
        assert!(!reply.is_transient());
    }

    #[tokio::test]
    async fn test_unknown_channel_is_transient() {
        let reply = handle_line(&resolver(), "^emote ghost Kappa", "^").await.unwrap();
        assert_eq!(reply, Reply::transient("Channel not found: ghost"));
    }

    #[tokio::test]
    async fn test_missing_argument_is_transient() {
        let reply = handle_line(&resolver(), "^emote forsen", "^").await.unwrap();
        assert_eq!(reply, Reply::transient("Missing required argument: emote_name"));
    }

    #[tokio::test]
    async fn test_chatter_is_ignored() {
        assert_eq!(handle_line(&resolver(), "forsenE forsenE", "^").await, None);
        assert_eq!(handle_line(&resolver(), "^dance", "^").await, None);
    }
}
