//! Twitch provider.
//!
//! Owns the app access token and serves both channel-name resolution and
//! native emote lookups from the Helix API.

mod adapter;
pub mod api;
mod auth;
mod directory;

pub use adapter::TwitchAdapter;
pub use api::TwitchEndpoints;
pub use auth::{AppCredential, TwitchCredentialStore};
pub use directory::TwitchChannelDirectory;
