//! Channel name resolution.

use async_trait::async_trait;
use imgify_core::Channel;

use crate::error::DirectoryError;

/// Resolves a human-readable channel name to the id every provider keys
/// channel data by.
///
/// Authenticated implementations expect the caller to have run
/// [`CredentialSource::ensure_valid`](crate::CredentialSource::ensure_valid)
/// first.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Looks up a channel by login name.
    ///
    /// Returns [`DirectoryError::NotFound`] when the platform has no such
    /// channel; this is distinct from an emote not being found.
    async fn resolve(&self, channel_name: &str) -> Result<Channel, DirectoryError>;
}
