// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Emote Imgify Providers
//!
//! Concrete emote hosts and the resolver that cascades across them.
//!
//! ## Supported Providers
//!
//! | Provider | Precedence | Credential | Channel source | Global source |
//! |----------|------------|------------|----------------|---------------|
//! | Twitch | Primary | App token | Helix chat emotes | Helix global emotes |
//! | BetterTTV | Secondary | None | Cached user (channel, shared) | Cached globals |
//! | FrankerFaceZ | Tertiary | None | Room sets | Global sets |
//!
//! Twitch also owns the app access token ([`TwitchCredentialStore`]) and
//! the channel name lookup ([`TwitchChannelDirectory`]).
//!
//! ## Usage
//!
//! ```ignore
//! use imgify_providers::EmoteResolver;
//!
//! let resolver = EmoteResolver::builder()
//!     .client_credentials(client_id, client_secret)
//!     .build()?;
//!
//! let result = resolver.resolve_channel_emote("cohhcarnage", "cohhLUL").await?;
//! if let Some(url) = result.url() {
//!     println!("{url}");
//! }
//! ```

pub mod registry;
pub mod resolver;

// Provider modules
pub mod bttv;
pub mod ffz;
pub mod twitch;

// Re-export key types
pub use registry::{Endpoints, ProviderRegistry};
pub use resolver::{
    BuildError, EmoteRequest, EmoteResolver, Resolution, ResolveError, ResolverBuilder,
};

pub use bttv::{BttvAdapter, BttvEndpoints};
pub use ffz::{FfzAdapter, FfzEndpoints};
pub use twitch::{
    AppCredential, TwitchAdapter, TwitchChannelDirectory, TwitchCredentialStore, TwitchEndpoints,
};
