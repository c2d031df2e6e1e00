//! Replies and output formatting for the CLI.

mod json;
mod text;

use std::time::Duration;

use imgify_core::EmoteMatch;
use imgify_providers::ResolveError;

use crate::chat::CommandError;

pub use json::JsonFormatter;
pub use text::TextFormatter;


/// Reply when no provider has the emote.
pub const NOT_FOUND_REPLY: &str = "Emote cannot be found";

/// How long a transient reply stays visible on the chat gateway.
pub const TRANSIENT_REPLY_TTL: Duration = Duration::from_secs(5);

/// A chat reply.
///
/// Transient replies are errors the gateway deletes after
/// [`TRANSIENT_REPLY_TTL`], along with the message that caused them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message body.
    pub text: String,
    /// Set for transient replies.
    pub delete_after: Option<Duration>,
}

impl Reply {
    /// A reply that stays in the channel.
    pub fn permanent(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delete_after: None,
        }
    }

    /// A reply the gateway removes after a short delay.
    pub fn transient(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delete_after: Some(TRANSIENT_REPLY_TTL),
        }
    }

    /// URL verbatim, or the not-found message.
    pub fn from_match(result: &EmoteMatch) -> Self {
        match result {
            EmoteMatch::Found(url) => Self::permanent(url.as_str()),
            EmoteMatch::NotFound => Self::permanent(NOT_FOUND_REPLY),
        }
    }

    /// Short user-facing message for a failed resolution.
    pub fn from_error(err: &ResolveError) -> Self {
        match err {
            ResolveError::ChannelNotFound(name) => Self::transient(format!("Channel not found: {name}")),
            ResolveError::Auth(_) => {
                Self::transient("Could not authenticate with Twitch, try again later")
            }
            ResolveError::ChannelLookup(_) => Self::transient("Unknown error occurred with command!"),
        }
    }

    /// Usage message for a malformed command.
    pub fn from_command_error(err: &CommandError) -> Self {
        Self::transient(err.to_string())
    }

    /// Returns true if the gateway should delete this reply.
    pub fn is_transient(&self) -> bool {
        self.delete_after.is_some()
    }
}
