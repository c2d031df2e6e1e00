//! Text output formatting.

use imgify_fetch::{AttemptOutcome, CascadeOutcome};
use imgify_providers::ProviderRegistry;

use super::Reply;
use crate::config::AppConfig;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

const NOT_SET: &str = "(not set)";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a reply. Transient replies carry their expiry.
    pub fn format_reply(&self, reply: &Reply) -> String {
        match reply.delete_after {
            Some(ttl) => {
                let note = format!("(deleted after {}s)", ttl.as_secs());
                format!("{} {}", self.color(&reply.text, YELLOW), self.color(&note, DIM))
            }
            None => reply.text.clone(),
        }
    }

    /// One line per provider attempt.
    pub fn format_attempts(&self, outcome: &CascadeOutcome) -> String {
        let mut lines = Vec::with_capacity(outcome.attempts.len() + 1);

        for attempt in &outcome.attempts {
            let status = match &attempt.outcome {
                AttemptOutcome::Found => self.color("found", GREEN),
                AttemptOutcome::NotFound => self.color("not found", DIM),
                AttemptOutcome::Failed(message) => {
                    self.color(&format!("failed: {message}"), RED)
                }
            };
            lines.push(format!(
                "  {:<14} {:>6}ms  {}",
                attempt.provider.display_name(),
                attempt.duration.as_millis(),
                status
            ));
        }

        lines.push(format!(
            "  {} providers queried in {}ms",
            outcome.attempts_count(),
            outcome.duration.as_millis()
        ));
        lines.join("\n")
    }

    /// Effective configuration. Secrets must already be masked.
    pub fn format_config(&self, config: &AppConfig, path: &str) -> String {
        let opt = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_SET.to_string());
        let endpoints = &config.endpoints;

        let lines = [
            self.color("Emote Imgify Configuration", BOLD),
            "─".repeat(40),
            format!("Config file:       {path}"),
            String::new(),
            format!("Twitch client id:  {}", opt(&config.twitch.client_id)),
            format!("Twitch secret:     {}", opt(&config.twitch.client_secret)),
            format!("Access token:      {}", opt(&config.twitch.access_token)),
            format!("Gateway token:     {}", opt(&config.chat.gateway_token)),
            format!("Command prefix:    {}", config.chat.command_prefix),
            format!("HTTP timeout:      {}s", config.http.timeout_secs),
            String::new(),
            "Endpoints:".to_string(),
            format!("  Twitch id:       {}", endpoints.twitch.id_base),
            format!("  Twitch api:      {}", endpoints.twitch.api_base),
            format!("  BetterTTV api:   {}", endpoints.bttv.api_base),
            format!("  BetterTTV cdn:   {}", endpoints.bttv.cdn_base),
            format!("  FrankerFaceZ:    {}", endpoints.ffz.api_base),
            String::new(),
            "Providers (lookup order):".to_string(),
        ];

        let providers = ProviderRegistry::info().into_iter().enumerate().map(|(i, info)| {
            let auth = if info.requires_credential { ", app token" } else { "" };
            format!("  {}. {} ({}{auth})", i + 1, info.kind.display_name(), info.id)
        });

        lines.into_iter().chain(providers).collect::<Vec<_>>().join("\n")
    }

    fn color(&self, text: &str, code: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
