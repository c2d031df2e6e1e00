//! FrankerFaceZ API types.

use std::collections::HashMap;

use imgify_core::names_match;
use imgify_fetch::{HttpError, endpoint_url};
use serde::{Deserialize, Serialize};
use url::Url;

/// FrankerFaceZ API base URL.
pub const FFZ_API_BASE: &str = "https://api.frankerfacez.com";

/// FrankerFaceZ endpoint bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfzEndpoints {
    /// Base for the v1 API.
    pub api_base: String,
}

impl Default for FfzEndpoints {
    fn default() -> Self {
        Self {
            api_base: FFZ_API_BASE.to_string(),
        }
    }
}

impl FfzEndpoints {
    /// Points the API at `base`.
    pub fn with_base(base: &str) -> Self {
        Self {
            api_base: base.to_string(),
        }
    }

    /// Room record for a Twitch broadcaster id.
    pub fn room_url(&self, twitch_id: &str) -> Result<Url, HttpError> {
        endpoint_url(&self.api_base, &format!("v1/room/id/{twitch_id}"))
    }

    /// Global sets.
    pub fn global_url(&self) -> Result<Url, HttpError> {
        endpoint_url(&self.api_base, "v1/set/global")
    }
}

// ============================================================================
// Types
// ============================================================================

/// `GET /v1/room/id/<id>` response.
#[derive(Debug, Deserialize)]
pub struct FfzRoomResponse {
    /// Room metadata.
    pub room: FfzRoom,
    /// Emote sets keyed by set id.
    #[serde(default)]
    pub sets: HashMap<String, FfzSet>,
}

/// Room metadata. Only the active set is read.
#[derive(Debug, Deserialize)]
pub struct FfzRoom {
    /// Active set id.
    pub set: u64,
}

/// `GET /v1/set/global` response.
#[derive(Debug, Deserialize)]
pub struct FfzGlobalResponse {
    /// Sets every user sees.
    #[serde(default)]
    pub default_sets: Vec<u64>,
    /// Emote sets keyed by set id.
    #[serde(default)]
    pub sets: HashMap<String, FfzSet>,
}

/// One emote set.
#[derive(Debug, Default, Deserialize)]
pub struct FfzSet {
    /// Emotes in the set.
    #[serde(default)]
    pub emoticons: Vec<FfzEmote>,
}

/// Emote record.
#[derive(Debug, Clone, Deserialize)]
pub struct FfzEmote {
    /// Emote id.
    pub id: u64,
    /// Chat name.
    pub name: String,
    /// Image URLs keyed by scale (`"1"`, `"2"`, `"4"`).
    #[serde(default)]
    pub urls: HashMap<String, Option<String>>,
}

impl FfzEmote {
    /// URL at the largest numeric scale, made absolute.
    pub fn best_url(&self) -> Option<String> {
        self.urls
            .iter()
            .filter_map(|(scale, url)| {
                let scale = scale.parse::<u32>().ok()?;
                let url = url.as_deref().filter(|url| !url.is_empty())?;
                Some((scale, url))
            })
            .max_by_key(|(scale, _)| *scale)
            .map(|(_, url)| absolute_url(url))
    }
}

fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

// ============================================================================
// Search
// ============================================================================

/// Set keys in search order: `preferred` ids first, then the rest ascending.
///
/// Non-numeric keys sort last.
pub fn search_order<'a>(sets: &'a HashMap<String, FfzSet>, preferred: &[u64]) -> Vec<&'a str> {
    let mut order: Vec<&str> = preferred
        .iter()
        .filter_map(|id| sets.get_key_value(&id.to_string()).map(|(key, _)| key.as_str()))
        .collect();

    let mut rest: Vec<&str> = sets
        .keys()
        .map(String::as_str)
        .filter(|key| !order.contains(key))
        .collect();
    rest.sort_by_key(|key| (key.parse::<u64>().unwrap_or(u64::MAX), *key));

    order.extend(rest);
    order
}

/// First matching emote across every set, `preferred` sets first.
pub fn find_emote<'a>(
    sets: &'a HashMap<String, FfzSet>,
    preferred: &[u64],
    name: &str,
) -> Option<&'a FfzEmote> {
    search_order(sets, preferred)
        .into_iter()
        .filter_map(|key| sets.get(key))
        .flat_map(|set| set.emoticons.iter())
        .find(|emote| names_match(&emote.name, name))
}

// ============================================================================
// Tests
// ============================================================================
