//! FrankerFaceZ emote adapter.

use async_trait::async_trait;
use imgify_core::{ChannelId, EmoteMatch, ProviderKind};
use imgify_fetch::{HttpClient, HttpError, LookupError, ProviderAdapter};
use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::api::{FfzEmote, FfzEndpoints, FfzGlobalResponse, FfzRoomResponse, find_emote};

/// Third-party emotes from FrankerFaceZ. No credential required.
#[derive(Debug, Clone)]
pub struct FfzAdapter {
    http: HttpClient,
    endpoints: FfzEndpoints,
}

impl FfzAdapter {
    /// Creates an adapter.
    pub fn new(http: HttpClient, endpoints: FfzEndpoints) -> Self {
        Self { http, endpoints }
    }
}

fn to_match(emote: Option<&FfzEmote>) -> Result<EmoteMatch, LookupError> {
    let Some(emote) = emote else {
        return Ok(EmoteMatch::NotFound);
    };

    emote
        .best_url()
        .map(EmoteMatch::Found)
        .ok_or_else(|| LookupError::InvalidResponse(format!("emote {} has no image URL", emote.id)))
}

#[async_trait]
impl ProviderAdapter for FfzAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::FrankerFaceZ
    }

    #[instrument(skip(self), fields(provider = "ffz"))]
    async fn lookup_channel_emote(
        &self,
        channel_id: &ChannelId,
        name: &str,
    ) -> Result<EmoteMatch, LookupError> {
        let url = self.endpoints.room_url(channel_id.as_str())?;
        let room: FfzRoomResponse = match self.http.get_json(&url, None).await {
            Ok(room) => room,
            Err(HttpError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                debug!(channel_id = %channel_id, "No FrankerFaceZ room for channel");
                return Ok(EmoteMatch::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        debug!(active_set = room.room.set, sets = room.sets.len(), "Fetched FrankerFaceZ room");
        to_match(find_emote(&room.sets, &[room.room.set], name))
    }

    #[instrument(skip(self), fields(provider = "ffz"))]
    async fn lookup_global_emote(&self, name: &str) -> Result<EmoteMatch, LookupError> {
        let url = self.endpoints.global_url()?;
        let global: FfzGlobalResponse = self.http.get_json(&url, None).await?;
        debug!(sets = global.sets.len(), "Fetched FrankerFaceZ global sets");
        to_match(find_emote(&global.sets, &global.default_sets, name))
    }
}

// ============================================================================
// Tests
// ============================================================================
