//! Domain models for Emote Imgify.
//!
//! ## Submodules
//!
//! - [`provider`] - Emote host kinds and their precedence
//! - [`channel`] - Broadcaster identifiers
//! - [`emote`] - Queries, matches and name comparison

mod channel;
mod emote;
mod provider;

// Re-export everything at the models level
pub use channel::{Channel, ChannelId};
pub use emote::{EmoteMatch, EmoteQuery, EmoteScope, names_match};
pub use provider::ProviderKind;
