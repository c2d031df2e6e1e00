//! JSON output formatting.

use anyhow::Result;
use imgify_fetch::{AttemptOutcome, LookupAttempt};
use imgify_providers::Resolution;
use serde::Serialize;

use super::Reply;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a resolution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOutput {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelOutput>,
    pub reply: ReplyOutput,
    pub attempts: Vec<AttemptOutput>,
    pub duration_ms: u128,
}

/// Resolved channel.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelOutput {
    pub login: String,
    pub id: String,
}

/// One provider lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutput {
    pub provider: &'static str,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u128,
}

/// A chat reply.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyOutput {
    pub text: String,
    pub transient: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_after_secs: Option<u64>,
}

impl From<&Reply> for ReplyOutput {
    fn from(reply: &Reply) -> Self {
        Self {
            text: reply.text.clone(),
            transient: reply.is_transient(),
            delete_after_secs: reply.delete_after.map(|ttl| ttl.as_secs()),
        }
    }
}

impl From<&LookupAttempt> for AttemptOutput {
    fn from(attempt: &LookupAttempt) -> Self {
        let (outcome, error) = match &attempt.outcome {
            AttemptOutcome::Found => ("found", None),
            AttemptOutcome::NotFound => ("not_found", None),
            AttemptOutcome::Failed(message) => ("failed", Some(message.clone())),
        };
        Self {
            provider: attempt.provider.cli_name(),
            outcome,
            error,
            duration_ms: attempt.duration.as_millis(),
        }
    }
}

impl From<&Resolution> for ResolutionOutput {
    fn from(resolution: &Resolution) -> Self {
        let outcome = &resolution.outcome;
        Self {
            status: if outcome.is_found() { "found" } else { "not_found" },
            url: outcome.result.url().map(str::to_string),
            provider: outcome.matched_provider().map(|p| p.cli_name()),
            channel: resolution.channel.as_ref().map(|c| ChannelOutput {
                login: c.login.clone(),
                id: c.id.to_string(),
            }),
            reply: ReplyOutput::from(&Reply::from_match(&outcome.result)),
            attempts: outcome.attempts.iter().map(AttemptOutput::from).collect(),
            duration_ms: outcome.duration.as_millis(),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a resolution with its attempts.
    pub fn format_resolution(&self, resolution: &Resolution) -> Result<String> {
        self.format(&ResolutionOutput::from(resolution))
    }

    /// Formats a reply.
    pub fn format_reply(&self, reply: &Reply) -> Result<String> {
        self.format(&ReplyOutput::from(reply))
    }
}
