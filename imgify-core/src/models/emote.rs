//! Emote query and match types.

use serde::{Deserialize, Serialize};

use super::channel::ChannelId;

// ============================================================================
// Name Matching
// ============================================================================

/// Case-insensitive exact comparison of emote names.
///
/// Uses full Unicode lowercasing without allocating, so `KEKW`, `kekw` and
/// `KeKw` all match each other.
pub fn names_match(candidate: &str, requested: &str) -> bool {
    candidate
        .chars()
        .flat_map(char::to_lowercase)
        .eq(requested.chars().flat_map(char::to_lowercase))
}

// ============================================================================
// Emote Query
// ============================================================================

/// Where to look for an emote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "channel_id", rename_all = "snake_case")]
pub enum EmoteScope {
    /// Platform-wide emotes.
    Global,
    /// Emotes belonging to one broadcaster.
    Channel(ChannelId),
}

/// A single lookup request, built per incoming command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmoteQuery {
    /// Lookup scope.
    pub scope: EmoteScope,
    /// Requested emote name, compared case-insensitively.
    pub name: String,
}

impl EmoteQuery {
    /// Query for a global emote.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            scope: EmoteScope::Global,
            name: name.into(),
        }
    }

    /// Query for an emote in a broadcaster's channel.
    pub fn channel(channel_id: ChannelId, name: impl Into<String>) -> Self {
        Self {
            scope: EmoteScope::Channel(channel_id),
            name: name.into(),
        }
    }

    /// Returns the channel id for channel-scoped queries.
    pub fn channel_id(&self) -> Option<&ChannelId> {
        match &self.scope {
            EmoteScope::Global => None,
            EmoteScope::Channel(id) => Some(id),
        }
    }

    /// Returns true if `candidate` names the requested emote.
    pub fn matches(&self, candidate: &str) -> bool {
        names_match(candidate, &self.name)
    }
}

// ============================================================================
// Emote Match
// ============================================================================

/// Terminal result of a lookup.
///
/// `NotFound` is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum EmoteMatch {
    /// Displayable image URL.
    Found(String),
    /// No provider has the emote.
    NotFound,
}

impl EmoteMatch {
    /// Returns true for `Found`.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the URL, if found.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Found(url) => Some(url),
            Self::NotFound => None,
        }
    }

    /// Consumes the match and returns the URL, if found.
    pub fn into_url(self) -> Option<String> {
        match self {
            Self::Found(url) => Some(url),
            Self::NotFound => None,
        }
    }
}

impl From<Option<String>> for EmoteMatch {
    fn from(url: Option<String>) -> Self {
        url.map_or(Self::NotFound, Self::Found)
    }
}

// ============================================================================
// Tests
// ============================================================================
