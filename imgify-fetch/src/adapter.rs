//! Provider adapter trait and types.
//!
//! An adapter wraps one emote host: its endpoint shapes, its auth needs and
//! its rules for turning a raw record into a single canonical URL. The
//! cascade only ever talks to this trait.

use async_trait::async_trait;
use imgify_core::{ChannelId, EmoteMatch, EmoteQuery, EmoteScope, ProviderKind};
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

// ============================================================================
// Provider Adapter Trait
// ============================================================================

/// One emote host.
///
/// ## Implementing an Adapter
///
/// ```ignore
/// struct SevenTvAdapter { http: HttpClient }
///
/// #[async_trait]
/// impl ProviderAdapter for SevenTvAdapter {
///     fn kind(&self) -> ProviderKind {
///         ProviderKind::SevenTv
///     }
///
///     async fn lookup_channel_emote(
///         &self,
///         channel_id: &ChannelId,
///         name: &str,
///     ) -> Result<EmoteMatch, LookupError> {
///         let set = self.fetch_user_set(channel_id).await?;
///         Ok(set.find(name).map(|e| e.url()).into())
///     }
///
///     async fn lookup_global_emote(&self, name: &str) -> Result<EmoteMatch, LookupError> {
///         // ...
///     }
/// }
/// ```
///
/// Variant rules (animated detection, scale selection) stay inside the
/// adapter; the cascade never inspects records.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which host this adapter queries. Also fixes its cascade position.
    fn kind(&self) -> ProviderKind;

    /// Identifier used in logs and attempt records.
    fn id(&self) -> &'static str {
        self.kind().cli_name()
    }

    /// Looks up an emote in a broadcaster's channel.
    ///
    /// Returns `Ok(EmoteMatch::NotFound)` when the provider answered but has no
    /// such emote, and `Err` when the provider could not answer at all.
    async fn lookup_channel_emote(
        &self,
        channel_id: &ChannelId,
        name: &str,
    ) -> Result<EmoteMatch, LookupError>;

    /// Looks up a platform-wide emote.
    async fn lookup_global_emote(&self, name: &str) -> Result<EmoteMatch, LookupError>;

    /// Dispatches a query to the scoped or global lookup.
    async fn lookup(&self, query: &EmoteQuery) -> Result<EmoteMatch, LookupError> {
        match &query.scope {
            EmoteScope::Global => self.lookup_global_emote(&query.name).await,
            EmoteScope::Channel(channel_id) => {
                self.lookup_channel_emote(channel_id, &query.name).await
            }
        }
    }
}

// ============================================================================
// Adapter Info
// ============================================================================

/// Information about an adapter (for reporting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Adapter ID.
    pub id: String,
    /// Provider kind.
    pub kind: ProviderKind,
    /// Cascade priority.
    pub priority: u32,
    /// Whether lookups need the app credential.
    pub requires_credential: bool,
}

impl AdapterInfo {
    /// Creates adapter info from an adapter implementation.
    pub fn from_adapter(adapter: &dyn ProviderAdapter) -> Self {
        let kind = adapter.kind();
        Self {
            id: adapter.id().to_string(),
            kind,
            priority: kind.priority(),
            requires_credential: kind.requires_credential(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
