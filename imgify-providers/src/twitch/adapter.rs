//! Twitch emote adapter.

use std::sync::Arc;

use async_trait::async_trait;
use imgify_core::{ChannelId, EmoteMatch, ProviderKind};
use imgify_fetch::{CredentialSource, HttpClient, LookupError, ProviderAdapter};
use tracing::{debug, instrument};
use url::Url;

use super::api::{HelixEmote, HelixResponse, TwitchEndpoints, find_emote};

/// Native Twitch emotes through the authenticated Helix API.
pub struct TwitchAdapter {
    http: HttpClient,
    endpoints: TwitchEndpoints,
    credentials: Arc<dyn CredentialSource>,
}

impl TwitchAdapter {
    /// Creates an adapter sharing the app credential.
    pub fn new(
        http: HttpClient,
        endpoints: TwitchEndpoints,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            http,
            endpoints,
            credentials,
        }
    }

    async fn fetch_emotes(&self, url: &Url) -> Result<Vec<HelixEmote>, LookupError> {
        let headers = self.credentials.auth_headers().await?;
        let response: HelixResponse<HelixEmote> = self.http.get_json(url, Some(headers)).await?;
        debug!(count = response.data.len(), "Fetched Twitch emotes");
        Ok(response.data)
    }

    fn select(emotes: &[HelixEmote], name: &str) -> Result<EmoteMatch, LookupError> {
        let Some(emote) = find_emote(emotes, name) else {
            return Ok(EmoteMatch::NotFound);
        };

        emote.image_url().map(EmoteMatch::Found).ok_or_else(|| {
            LookupError::InvalidResponse(format!("emote {} has no image URL", emote.id))
        })
    }
}

#[async_trait]
impl ProviderAdapter for TwitchAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Twitch
    }

    #[instrument(skip(self), fields(provider = "twitch"))]
    async fn lookup_channel_emote(
        &self,
        channel_id: &ChannelId,
        name: &str,
    ) -> Result<EmoteMatch, LookupError> {
        let url = self.endpoints.channel_emotes_url(channel_id.as_str())?;
        let emotes = self.fetch_emotes(&url).await?;
        Self::select(&emotes, name)
    }

    #[instrument(skip(self), fields(provider = "twitch"))]
    async fn lookup_global_emote(&self, name: &str) -> Result<EmoteMatch, LookupError> {
        let url = self.endpoints.global_emotes_url()?;
        let emotes = self.fetch_emotes(&url).await?;
        Self::select(&emotes, name)
    }
}

impl std::fmt::Debug for TwitchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitchAdapter")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
