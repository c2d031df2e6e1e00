// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Emote Imgify Fetch
//!
//! Lookup infrastructure shared by every emote provider.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing and JSON helpers
//!
//! ## Lookup Cascade
//!
//! Providers are queried in a fixed precedence order and the first match
//! wins:
//!
//! - [`adapter::ProviderAdapter`] - Trait each emote host implements
//! - [`credentials::CredentialSource`] - Shared app credential used by
//!   authenticated adapters
//! - [`directory::ChannelDirectory`] - Channel name to channel id
//! - [`cascade::Cascade`] - Runs adapters in order, treating provider
//!   failures as "no match"
//!
//! ## Example
//!
//! ```ignore
//! use imgify_core::EmoteQuery;
//! use imgify_fetch::Cascade;
//!
//! let cascade = Cascade::new(vec![twitch, bttv, ffz]);
//! let outcome = cascade.execute(&EmoteQuery::global("Kappa")).await;
//! println!("{:?}", outcome.result);
//! ```

// Core modules
pub mod adapter;
pub mod cascade;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod host;

// Re-export key types at crate root

// Errors
pub use error::{AuthError, DirectoryError, HttpError, LookupError};

// Host APIs
pub use host::http::{HttpClient, endpoint_url};

// Adapters & Cascade
pub use adapter::{AdapterInfo, ProviderAdapter};
pub use cascade::{AttemptOutcome, Cascade, CascadeOutcome, LookupAttempt};
pub use credentials::CredentialSource;
pub use directory::ChannelDirectory;
