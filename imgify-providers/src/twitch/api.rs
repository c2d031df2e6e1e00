//! Twitch Helix and OAuth response types.

use imgify_core::names_match;
use imgify_fetch::{HttpError, endpoint_url};
use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Twitch identity (OAuth) base URL.
pub const TWITCH_ID_BASE: &str = "https://id.twitch.tv";

/// Twitch Helix API base URL.
pub const TWITCH_API_BASE: &str = "https://api.twitch.tv";

/// Emote ids with this prefix are rendered from the v2 CDN template.
pub const ANIMATED_ID_PREFIX: &str = "emotesv2_";

/// v2 emote CDN; `{id}` is replaced by the emote id.
const ANIMATED_TEMPLATE: &str = "https://static-cdn.jtvnw.net/emoticons/v2/{id}/default/dark/3.0";

// ============================================================================
// Endpoints
// ============================================================================

/// Twitch endpoint bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitchEndpoints {
    /// Base for `oauth2/token` and `oauth2/validate`.
    pub id_base: String,
    /// Base for Helix endpoints.
    pub api_base: String,
}

impl Default for TwitchEndpoints {
    fn default() -> Self {
        Self {
            id_base: TWITCH_ID_BASE.to_string(),
            api_base: TWITCH_API_BASE.to_string(),
        }
    }
}

impl TwitchEndpoints {
    /// Points both bases at one server.
    pub fn with_base(base: &str) -> Self {
        Self {
            id_base: base.to_string(),
            api_base: base.to_string(),
        }
    }

    /// Client-credentials token endpoint.
    pub fn token_url(&self) -> Result<Url, HttpError> {
        endpoint_url(&self.id_base, "oauth2/token")
    }

    /// Token validation endpoint.
    pub fn validate_url(&self) -> Result<Url, HttpError> {
        endpoint_url(&self.id_base, "oauth2/validate")
    }

    /// User lookup by login.
    pub fn users_url(&self, login: &str) -> Result<Url, HttpError> {
        let mut url = endpoint_url(&self.api_base, "helix/users")?;
        url.query_pairs_mut().append_pair("login", login);
        Ok(url)
    }

    /// Emotes of one broadcaster.
    pub fn channel_emotes_url(&self, broadcaster_id: &str) -> Result<Url, HttpError> {
        let mut url = endpoint_url(&self.api_base, "helix/chat/emotes")?;
        url.query_pairs_mut()
            .append_pair("broadcaster_id", broadcaster_id);
        Ok(url)
    }

    /// Platform-wide emotes.
    pub fn global_emotes_url(&self) -> Result<Url, HttpError> {
        endpoint_url(&self.api_base, "helix/chat/emotes/global")
    }
}

// ============================================================================
// OAuth Types
// ============================================================================

/// Response from the client-credentials token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// App access token.
    pub access_token: String,
    /// Lifetime in seconds. Informational only; validity is checked online.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Usually `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error body returned by id.twitch.tv and Helix.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    /// HTTP status echoed in the body.
    #[serde(default)]
    pub status: Option<u16>,
    /// Human-readable reason.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best-effort message from a raw error body.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| body.trim().to_string())
    }
}

// ============================================================================
// Helix Types
// ============================================================================

/// Helix list envelope.
#[derive(Debug, Deserialize)]
pub struct HelixResponse<T> {
    /// Returned records.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Helix user record.
#[derive(Debug, Clone, Deserialize)]
pub struct HelixUser {
    /// Broadcaster id.
    pub id: String,
    /// Login handle.
    pub login: String,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Helix emote record.
#[derive(Debug, Clone, Deserialize)]
pub struct HelixEmote {
    /// Emote id.
    pub id: String,
    /// Emote name as typed in chat.
    pub name: String,
    /// Static image URLs.
    #[serde(default)]
    pub images: HelixEmoteImages,
    /// Available formats (`static`, `animated`).
    #[serde(default)]
    pub format: Vec<String>,
}

/// Static image URLs by scale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelixEmoteImages {
    /// 1x scale.
    #[serde(default)]
    pub url_1x: Option<String>,
    /// 2x scale.
    #[serde(default)]
    pub url_2x: Option<String>,
    /// 4x scale.
    #[serde(default)]
    pub url_4x: Option<String>,
}

impl HelixEmote {
    /// Returns true if the id carries the v2 prefix.
    pub fn is_animated(&self) -> bool {
        self.id.starts_with(ANIMATED_ID_PREFIX)
    }

    /// Canonical URL for this emote.
    ///
    /// v2 ids use the dark-theme 3.0 template; everything else uses the 4x
    /// static image, falling back to smaller scales when 4x is absent.
    pub fn image_url(&self) -> Option<String> {
        if self.is_animated() {
            return Some(ANIMATED_TEMPLATE.replace("{id}", &self.id));
        }

        [
            &self.images.url_4x,
            &self.images.url_2x,
            &self.images.url_1x,
        ]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .cloned()
    }
}

/// First emote whose name matches, in provider order.
pub fn find_emote<'a>(emotes: &'a [HelixEmote], name: &str) -> Option<&'a HelixEmote> {
    emotes.iter().find(|emote| names_match(&emote.name, name))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CHANNEL_EMOTES: &str = r#"{
        "data": [
            {
                "id": "304822798",
                "name": "PogChamp",
                "images": {
                    "url_1x": "https://static-cdn.jtvnw.net/emoticons/v1/304822798/1.0",
                    "url_2x": "https://static-cdn.jtvnw.net/emoticons/v1/304822798/2.0",
                    "url_4x": "https://static-cdn.jtvnw.net/emoticons/v1/304822798/3.0"
                },
                "tier": "1000",
                "emote_type": "subscriptions",
                "format": ["static"]
            },
            {
                "id": "emotesv2_dc24652ada1e4c84a5e3ceebae4de709",
                "name": "cohhLUL",
                "images": {
                    "url_1x": "https://static-cdn.jtvnw.net/emoticons/v2/emotesv2_dc24652ada1e4c84a5e3ceebae4de709/static/light/1.0",
                    "url_2x": "https://static-cdn.jtvnw.net/emoticons/v2/emotesv2_dc24652ada1e4c84a5e3ceebae4de709/static/light/2.0",
                    "url_4x": "https://static-cdn.jtvnw.net/emoticons/v2/emotesv2_dc24652ada1e4c84a5e3ceebae4de709/static/light/3.0"
                },
                "format": ["static", "animated"]
            }
        ],
        "template": "https://static-cdn.jtvnw.net/emoticons/v2/{{id}}/{{format}}/{{theme_mode}}/{{scale}}"
    }"#;

    fn emotes() -> Vec<HelixEmote> {
        serde_json::from_str::<HelixResponse<HelixEmote>>(CHANNEL_EMOTES)
            .unwrap()
            .data
    }

    #[test]
    fn test_static_emote_uses_4x_image() {
        let emotes = emotes();
        let emote = find_emote(&emotes, "PogChamp").unwrap();
        assert!(!emote.is_animated());
        assert_eq!(
            emote.image_url().as_deref(),
            Some("https://static-cdn.jtvnw.net/emoticons/v1/304822798/3.0")
        );
    }

    #[test]
    fn test_prefixed_emote_uses_dark_template() {
        let emotes = emotes();
        let emote = find_emote(&emotes, "cohhLUL").unwrap();
        assert_eq!(
            emote.image_url().as_deref(),
            Some(
                "https://static-cdn.jtvnw.net/emoticons/v2/emotesv2_dc24652ada1e4c84a5e3ceebae4de709/default/dark/3.0"
            )
        );
    }

    #[test]
    fn test_find_ignores_case() {
        let emotes = emotes();
        for name in ["pogchamp", "POGCHAMP", "pOgChAmP"] {
            assert_eq!(find_emote(&emotes, name).map(|e| e.id.as_str()), Some("304822798"));
        }
        assert!(find_emote(&emotes, "Pog").is_none());
    }

    #[test]
    fn test_missing_4x_falls_back() {
        let emote = HelixEmote {
            id: "25".to_string(),
            name: "Kappa".to_string(),
            images: HelixEmoteImages {
                url_1x: Some("https://static-cdn.jtvnw.net/emoticons/v1/25/1.0".to_string()),
                url_2x: None,
                url_4x: None,
            },
            format: Vec::new(),
        };
        assert_eq!(
            emote.image_url().as_deref(),
            Some("https://static-cdn.jtvnw.net/emoticons/v1/25/1.0")
        );
    }

    #[test]
    fn test_endpoint_urls_encode_query() {
        let endpoints = TwitchEndpoints::default();
        assert_eq!(
            endpoints.users_url("some channel").unwrap().as_str(),
            "https://api.twitch.tv/helix/users?login=some+channel"
        );
        assert_eq!(
            endpoints.channel_emotes_url("141981764").unwrap().as_str(),
            "https://api.twitch.tv/helix/chat/emotes?broadcaster_id=141981764"
        );
        assert_eq!(
            endpoints.validate_url().unwrap().as_str(),
            "https://id.twitch.tv/oauth2/validate"
        );
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"status":403,"message":"invalid client secret"}"#),
            "invalid client secret"
        );
        assert_eq!(ErrorBody::message_from("  gateway timeout "), "gateway timeout");
    }
}
