// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Emote Imgify Core
//!
//! Core types and models shared by every Emote Imgify crate.
//!
//! This crate has no network code. It provides:
//!
//! - Domain models (providers, channels, emote queries and matches)
//! - The case-insensitive emote name comparison used by every provider
//! - Error types
//!
//! ## Key Types
//!
//! ### Provider Types
//! - [`ProviderKind`] - The emote hosts, in lookup precedence order
//!
//! ### Channel Types
//! - [`ChannelId`] - Opaque numeric broadcaster id shared by all providers
//! - [`Channel`] - A resolved login name and its id
//!
//! ### Emote Types
//! - [`EmoteQuery`] - What the user asked for (global or channel scoped)
//! - [`EmoteScope`] - Global or a specific channel
//! - [`EmoteMatch`] - Found URL or not found

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Provider types
    ProviderKind,
    // Channel types
    Channel,
    ChannelId,
    // Emote types
    EmoteMatch,
    EmoteQuery,
    EmoteScope,
    names_match,
};
