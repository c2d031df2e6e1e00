//! BetterTTV API types.

use imgify_core::names_match;
use imgify_fetch::{HttpError, endpoint_url};
use serde::{Deserialize, Serialize};
use url::Url;

/// BetterTTV API base URL.
pub const BTTV_API_BASE: &str = "https://api.betterttv.net";

/// BetterTTV image CDN base URL.
pub const BTTV_CDN_BASE: &str = "https://cdn.betterttv.net";

// ============================================================================
// Endpoints
// ============================================================================

/// BetterTTV endpoint bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BttvEndpoints {
    /// Base for the cached v3 API.
    pub api_base: String,
    /// Base for emote images.
    pub cdn_base: String,
}

impl Default for BttvEndpoints {
    fn default() -> Self {
        Self {
            api_base: BTTV_API_BASE.to_string(),
            cdn_base: BTTV_CDN_BASE.to_string(),
        }
    }
}

impl BttvEndpoints {
    /// Points the API at `base`, keeping the public CDN.
    pub fn with_api_base(base: &str) -> Self {
        Self {
            api_base: base.to_string(),
            ..Self::default()
        }
    }

    /// Cached user record for a Twitch broadcaster.
    pub fn user_url(&self, twitch_id: &str) -> Result<Url, HttpError> {
        endpoint_url(&self.api_base, &format!("3/cached/users/twitch/{twitch_id}"))
    }

    /// Cached global emote list.
    pub fn global_url(&self) -> Result<Url, HttpError> {
        endpoint_url(&self.api_base, "3/cached/emotes/global")
    }

    /// Largest image for an emote.
    pub fn image_url(&self, emote: &BttvEmote) -> String {
        let mut url = format!("{}/emote/{}/3x", self.cdn_base.trim_end_matches('/'), emote.id);
        if let Some(ext) = emote.image_type.extension() {
            url.push('.');
            url.push_str(ext);
        }
        url
    }
}

// ============================================================================
// Types
// ============================================================================

/// Cached user record. Only the emote tiers are read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BttvUser {
    /// Emotes uploaded by the broadcaster.
    #[serde(default)]
    pub channel_emotes: Vec<BttvEmote>,
    /// Emotes the broadcaster enabled from other users.
    #[serde(default)]
    pub shared_emotes: Vec<BttvEmote>,
}

impl BttvUser {
    /// First match, channel tier before shared tier.
    pub fn find(&self, name: &str) -> Option<&BttvEmote> {
        find_emote(&self.channel_emotes, name).or_else(|| find_emote(&self.shared_emotes, name))
    }
}

/// Emote record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BttvEmote {
    /// Emote id.
    pub id: String,
    /// Chat code.
    pub code: String,
    /// Image format.
    #[serde(default)]
    pub image_type: ImageType,
}

/// Image format reported by BetterTTV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Static PNG.
    #[default]
    Png,
    /// Animated GIF.
    Gif,
    /// WebP.
    Webp,
    /// Anything newer.
    #[serde(other)]
    Other,
}

impl ImageType {
    /// Extension appended to the CDN path. Only GIFs need one.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Gif => Some("gif"),
            Self::Png | Self::Webp | Self::Other => None,
        }
    }
}

/// First emote whose code matches.
pub fn find_emote<'a>(emotes: &'a [BttvEmote], name: &str) -> Option<&'a BttvEmote> {
    emotes.iter().find(|emote| names_match(&emote.code, name))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = r#"{
        "id": "5771aa498bbc1e572cb7ae4d",
        "bots": [],
        "avatar": "https://static-cdn.jtvnw.net/jtv_user_pictures/avatar.png",
        "channelEmotes": [
            {"id": "5d20a55de1cfde376e532972", "code": "forsenE", "imageType": "png", "animated": false, "userId": "5771aa498bbc1e572cb7ae4d"},
            {"id": "5e76d338d6581c3724c0f0b2", "code": "Clap", "imageType": "gif", "animated": true, "userId": "5771aa498bbc1e572cb7ae4d"}
        ],
        "sharedEmotes": [
            {"id": "566ca38765dbbdab32ec0560", "code": "forsenE", "imageType": "png", "animated": false, "user": {"id": "x", "name": "other"}},
            {"id": "55b6f480e66682f576dd94f5", "code": "Clap", "imageType": "gif", "animated": true, "user": {"id": "y", "name": "another"}},
            {"id": "5f1b0186cf6d2144653d2970", "code": "catJAM", "imageType": "gif", "animated": true, "user": {"id": "z", "name": "third"}}
        ]
    }"#;

    fn user() -> BttvUser {
        serde_json::from_str(USER).unwrap()
    }

    #[test]
    fn test_channel_tier_wins_over_shared() {
        let user = user();
        assert_eq!(user.find("forsenE").unwrap().id, "5d20a55de1cfde376e532972");
        assert_eq!(user.find("clap").unwrap().id, "5e76d338d6581c3724c0f0b2");
    }

    #[test]
    fn test_shared_tier_searched_second() {
        let user = user();
        assert_eq!(user.find("CATJAM").unwrap().id, "5f1b0186cf6d2144653d2970");
        assert!(user.find("catJA").is_none());
    }

    #[test]
    fn test_image_url_appends_gif_extension() {
        let endpoints = BttvEndpoints::default();
        let user = user();
        assert_eq!(
            endpoints.image_url(user.find("forsenE").unwrap()),
            "https://cdn.betterttv.net/emote/5d20a55de1cfde376e532972/3x"
        );
        assert_eq!(
            endpoints.image_url(user.find("Clap").unwrap()),
            "https://cdn.betterttv.net/emote/5e76d338d6581c3724c0f0b2/3x.gif"
        );
    }

    #[test]
    fn test_unknown_image_type_has_no_extension() {
        let emote: BttvEmote =
            serde_json::from_str(r#"{"id": "abc", "code": "newThing", "imageType": "avif"}"#)
                .unwrap();
        assert_eq!(emote.image_type, ImageType::Other);
        assert_eq!(
            BttvEndpoints::default().image_url(&emote),
            "https://cdn.betterttv.net/emote/abc/3x"
        );
    }

    #[test]
    fn test_missing_tiers_default_to_empty() {
        let user: BttvUser = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert!(user.find("anything").is_none());
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoints = BttvEndpoints::default();
        assert_eq!(
            endpoints.user_url("22484632").unwrap().as_str(),
            "https://api.betterttv.net/3/cached/users/twitch/22484632"
        );
        assert_eq!(
            endpoints.global_url().unwrap().as_str(),
            "https://api.betterttv.net/3/cached/emotes/global"
        );
    }
}
