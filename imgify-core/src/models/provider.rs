//! Provider-related types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported emote hosts.
///
/// Variants are declared in lookup precedence order: native platform emotes
/// win over third-party emotes of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Twitch native emotes (authenticated Helix API).
    Twitch,
    /// BetterTTV channel, shared and global emotes.
    #[serde(rename = "bttv")]
    BetterTtv,
    /// FrankerFaceZ room and global emote sets.
    #[serde(rename = "ffz")]
    FrankerFaceZ,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Twitch => "Twitch",
            Self::BetterTtv => "BetterTTV",
            Self::FrankerFaceZ => "FrankerFaceZ",
        }
    }

    /// Returns all provider kinds in lookup precedence order.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Twitch, Self::BetterTtv, Self::FrankerFaceZ]
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Twitch => "twitch",
            Self::BetterTtv => "bttv",
            Self::FrankerFaceZ => "ffz",
        }
    }

    /// Lookup priority (higher = queried first).
    ///
    /// Fixed per provider; the cascade never lets callers reorder hosts.
    pub fn priority(self) -> u32 {
        match self {
            Self::Twitch => 300,
            Self::BetterTtv => 200,
            Self::FrankerFaceZ => 100,
        }
    }

    /// Whether lookups against this provider need the app credential.
    pub fn requires_credential(self) -> bool {
        matches!(self, Self::Twitch)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Tests
// ============================================================================
