//! Provider registry.
//!
//! Central point for building the adapters in precedence order and for
//! describing which providers exist.

use std::sync::Arc;

use imgify_core::ProviderKind;
use imgify_fetch::{AdapterInfo, CredentialSource, HttpClient, ProviderAdapter};
use serde::{Deserialize, Serialize};

use crate::bttv::{BttvAdapter, BttvEndpoints};
use crate::ffz::{FfzAdapter, FfzEndpoints};
use crate::twitch::{TwitchAdapter, TwitchEndpoints};

// ============================================================================
// Endpoints
// ============================================================================

/// Endpoint bases for every provider.
///
/// Defaults point at the public services; tests and self-hosted mirrors
/// override them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Twitch identity and Helix.
    pub twitch: TwitchEndpoints,
    /// BetterTTV.
    pub bttv: BttvEndpoints,
    /// FrankerFaceZ.
    pub ffz: FfzEndpoints,
}

impl Endpoints {
    /// Points every provider at one server.
    pub fn with_base(base: &str) -> Self {
        Self {
            twitch: TwitchEndpoints::with_base(base),
            bttv: BttvEndpoints::with_api_base(base),
            ffz: FfzEndpoints::with_base(base),
        }
    }
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Registry of the supported emote providers.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider kinds in precedence order.
    pub fn kinds() -> &'static [ProviderKind] {
        ProviderKind::all()
    }

    /// Builds one adapter per provider, in precedence order.
    pub fn adapters(
        http: &HttpClient,
        endpoints: &Endpoints,
        credentials: Arc<dyn CredentialSource>,
    ) -> Vec<Arc<dyn ProviderAdapter>> {
        Self::kinds()
            .iter()
            .map(|kind| -> Arc<dyn ProviderAdapter> {
                match kind {
                    ProviderKind::Twitch => Arc::new(TwitchAdapter::new(
                        http.clone(),
                        endpoints.twitch.clone(),
                        Arc::clone(&credentials),
                    )),
                    ProviderKind::BetterTtv => {
                        Arc::new(BttvAdapter::new(http.clone(), endpoints.bttv.clone()))
                    }
                    ProviderKind::FrankerFaceZ => {
                        Arc::new(FfzAdapter::new(http.clone(), endpoints.ffz.clone()))
                    }
                }
            })
            .collect()
    }

    /// Describes every provider without building adapters.
    pub fn info() -> Vec<AdapterInfo> {
        Self::kinds()
            .iter()
            .map(|kind| AdapterInfo {
                id: kind.cli_name().to_string(),
                kind: *kind,
                priority: kind.priority(),
                requires_credential: kind.requires_credential(),
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
