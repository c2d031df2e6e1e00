//! Channel types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Opaque broadcaster identifier.
///
/// Twitch mints it; BetterTTV and FrankerFaceZ key their channel data by the
/// same value, so one id serves all three providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Parses a numeric channel id.
    pub fn parse(id: &str) -> Result<Self, CoreError> {
        let trimmed = id.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidChannelId(id.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A channel resolved for a single request. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Login handle as reported by the platform.
    pub login: String,
    /// Broadcaster id.
    pub id: ChannelId,
}

impl Channel {
    /// Creates a channel.
    pub fn new(login: impl Into<String>, id: ChannelId) -> Self {
        Self {
            login: login.into(),
            id,
        }
    }
}
