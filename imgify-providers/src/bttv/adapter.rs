//! BetterTTV emote adapter.

use async_trait::async_trait;
use imgify_core::{ChannelId, EmoteMatch, ProviderKind};
use imgify_fetch::{HttpClient, HttpError, LookupError, ProviderAdapter};
use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::api::{BttvEmote, BttvEndpoints, BttvUser, find_emote};

/// Third-party emotes from BetterTTV. No credential required.
#[derive(Debug, Clone)]
pub struct BttvAdapter {
    http: HttpClient,
    endpoints: BttvEndpoints,
}

impl BttvAdapter {
    /// Creates an adapter.
    pub fn new(http: HttpClient, endpoints: BttvEndpoints) -> Self {
        Self { http, endpoints }
    }

    fn to_match(&self, emote: Option<&BttvEmote>) -> EmoteMatch {
        emote
            .map(|emote| self.endpoints.image_url(emote))
            .into()
    }
}

#[async_trait]
impl ProviderAdapter for BttvAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::BetterTtv
    }

    #[instrument(skip(self), fields(provider = "bttv"))]
    async fn lookup_channel_emote(
        &self,
        channel_id: &ChannelId,
        name: &str,
    ) -> Result<EmoteMatch, LookupError> {
        let url = self.endpoints.user_url(channel_id.as_str())?;
        let user: BttvUser = match self.http.get_json(&url, None).await {
            Ok(user) => user,
            // Channels that never signed in to BetterTTV have no record.
            Err(HttpError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                debug!(channel_id = %channel_id, "No BetterTTV user for channel");
                return Ok(EmoteMatch::NotFound);
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            channel = user.channel_emotes.len(),
            shared = user.shared_emotes.len(),
            "Fetched BetterTTV emotes"
        );
        Ok(self.to_match(user.find(name)))
    }

    #[instrument(skip(self), fields(provider = "bttv"))]
    async fn lookup_global_emote(&self, name: &str) -> Result<EmoteMatch, LookupError> {
        let url = self.endpoints.global_url()?;
        let emotes: Vec<BttvEmote> = self.http.get_json(&url, None).await?;
        debug!(count = emotes.len(), "Fetched BetterTTV global emotes");
        Ok(self.to_match(find_emote(&emotes, name)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn adapter(server: &Server) -> BttvAdapter {
        BttvAdapter::new(
            HttpClient::new().unwrap(),
            BttvEndpoints::with_api_base(&server.url()),
        )
    }

    #[tokio::test]
    async fn test_channel_lookup_prefers_channel_tier() {
        let mut server = Server::new_async().await;
        let user = server
            .mock("GET", "/3/cached/users/twitch/26610234")
            .with_status(200)
            .with_body(
                r#"{
                    "channelEmotes": [{"id": "own", "code": "cohhHype", "imageType": "gif"}],
                    "sharedEmotes": [{"id": "shared", "code": "cohhhype", "imageType": "png"}]
                }"#,
            )
            .create_async()
            .await;

        let result = adapter(&server)
            .lookup_channel_emote(&ChannelId::parse("26610234").unwrap(), "COHHHYPE")
            .await
            .unwrap();

        assert_eq!(result.url(), Some("https://cdn.betterttv.net/emote/own/3x.gif"));
        user.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/3/cached/users/twitch/1")
            .with_status(404)
            .with_body(r#"{"message":"user not found"}"#)
            .create_async()
            .await;

        let result = adapter(&server)
            .lookup_channel_emote(&ChannelId::parse("1").unwrap(), "Clap")
            .await
            .unwrap();

        assert_eq!(result, EmoteMatch::NotFound);
    }

    #[tokio::test]
    async fn test_server_error_is_lookup_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/3/cached/users/twitch/1")
            .with_status(502)
            .create_async()
            .await;

        let err = adapter(&server)
            .lookup_channel_emote(&ChannelId::parse("1").unwrap(), "Clap")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Http(_)));
    }

    #[tokio::test]
    async fn test_global_lookup_is_case_insensitive() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/3/cached/emotes/global")
            .with_status(200)
            .with_body(
                r#"[
                    {"id": "54fa925e01e468494b85b54d", "code": "OhMyGoodness", "imageType": "png"},
                    {"id": "566c9fc265dbbdab32ec053b", "code": "FeelsBirthdayMan", "imageType": "png"}
                ]"#,
            )
            .expect(2)
            .create_async()
            .await;

        let adapter = adapter(&server);
        let hit = adapter.lookup_global_emote("ohmygoodness").await.unwrap();
        assert_eq!(
            hit.url(),
            Some("https://cdn.betterttv.net/emote/54fa925e01e468494b85b54d/3x")
        );
        assert_eq!(
            adapter.lookup_global_emote("OhMy").await.unwrap(),
            EmoteMatch::NotFound
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_lookup_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/3/cached/emotes/global")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = adapter(&server).lookup_global_emote("Kappa").await.unwrap_err();
        assert!(matches!(err, LookupError::Http(HttpError::Decode { .. })));
    }
}
