//! Twitch app access token lifecycle.
//!
//! One [`TwitchCredentialStore`] holds the client-credentials token shared by
//! every authenticated Twitch call. The token is minted on first use,
//! validated online before each resolution, and replaced in place when
//! Twitch reports it invalid. Nothing is persisted.
//!
//! Refreshes are single-flight: callers that observe the same invalid token
//! queue on a refresh lock and only the first one hits the token endpoint.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use imgify_fetch::{AuthError, CredentialSource, HttpClient};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::api::{ErrorBody, TokenResponse, TwitchEndpoints};

/// `Client-Id` header required by Helix.
const CLIENT_ID_HEADER: &str = "client-id";

// ============================================================================
// App Credential
// ============================================================================

/// An app access token and the headers derived from it.
#[derive(Clone)]
pub struct AppCredential {
    token: String,
    headers: HeaderMap,
    acquired_at: DateTime<Utc>,
    generation: u64,
}

impl AppCredential {
    /// Builds a credential and its Helix headers.
    pub fn new(client_id: &str, token: impl Into<String>, generation: u64) -> Result<Self, AuthError> {
        let token = token.into();

        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| AuthError::InvalidHeader(format!("token: {e}")))?;
        authorization.set_sensitive(true);

        let client_id = HeaderValue::from_str(client_id)
            .map_err(|e| AuthError::InvalidHeader(format!("client id: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(HeaderName::from_static(CLIENT_ID_HEADER), client_id);

        Ok(Self {
            token,
            headers,
            acquired_at: Utc::now(),
            generation,
        })
    }

    /// The raw access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `Authorization` and `Client-Id` headers for Helix requests.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Time since this token was stored.
    pub fn age(&self) -> TimeDelta {
        Utc::now() - self.acquired_at
    }

    /// Increments on every acquisition.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Debug for AppCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredential")
            .field("token", &"<redacted>")
            .field("acquired_at", &self.acquired_at)
            .field("generation", &self.generation)
            .finish()
    }
}

// ============================================================================
// Credential Store
// ============================================================================

/// Owner of the shared Twitch app credential.
pub struct TwitchCredentialStore {
    http: HttpClient,
    endpoints: TwitchEndpoints,
    client_id: String,
    client_secret: String,
    current: RwLock<Option<AppCredential>>,
    refresh: Mutex<()>,
}

impl TwitchCredentialStore {
    /// Creates an empty store. The first [`ensure_valid`](Self::ensure_valid)
    /// acquires a token.
    pub fn new(
        http: HttpClient,
        endpoints: TwitchEndpoints,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoints,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            current: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Seeds the store with a previously issued token.
    ///
    /// The token is validated like any other before first use.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Result<Self, AuthError> {
        let credential = AppCredential::new(&self.client_id, token, 1)?;
        *self.current.get_mut() = Some(credential);
        Ok(self)
    }

    /// Returns a copy of the current credential, if any.
    pub async fn current(&self) -> Option<AppCredential> {
        self.current.read().await.clone()
    }

    /// Exchanges the client id/secret for a new token and stores it.
    ///
    /// On failure the previous credential, if any, is left untouched.
    pub async fn acquire(&self) -> Result<AppCredential, AuthError> {
        let _guard = self.refresh.lock().await;
        self.acquire_locked().await
    }

    /// Token exchange; caller holds the refresh lock.
    #[instrument(skip(self))]
    async fn acquire_locked(&self) -> Result<AppCredential, AuthError> {
        let url = self.endpoints.token_url().map_err(AuthError::Request)?;
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .http
            .post_form(&url, &form)
            .await
            .map_err(AuthError::Request)?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = ErrorBody::message_from(&body);
            warn!(status = %status, message = %message, "Token request rejected");
            return Err(AuthError::Rejected { status, message });
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        if token.access_token.is_empty() {
            return Err(AuthError::MalformedResponse("empty access_token".to_string()));
        }

        let mut current = self.current.write().await;
        let generation = current.as_ref().map_or(1, |c| c.generation + 1);
        let credential = AppCredential::new(&self.client_id, token.access_token, generation)?;
        *current = Some(credential.clone());

        info!(
            generation,
            expires_in = ?token.expires_in,
            token_type = ?token.token_type,
            "Acquired app access token"
        );
        Ok(credential)
    }

    /// Asks Twitch whether a token is still valid.
    ///
    /// Any non-success status means invalid; transport failures are errors.
    #[instrument(skip(self, credential), fields(generation = credential.generation()))]
    async fn validate(&self, credential: &AppCredential) -> Result<bool, AuthError> {
        let url = self.endpoints.validate_url().map_err(AuthError::Request)?;

        let mut authorization = HeaderValue::from_str(&format!("OAuth {}", credential.token()))
            .map_err(|e| AuthError::InvalidHeader(format!("token: {e}")))?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let response = self
            .http
            .get_with_headers(&url, headers)
            .await
            .map_err(AuthError::Request)?;

        let valid = response.status().is_success();
        debug!(status = %response.status(), valid, "Validated app access token");
        Ok(valid)
    }

    /// Validates the current token, acquiring a new one if there is none or
    /// Twitch rejects it.
    #[instrument(skip(self))]
    pub async fn ensure_valid(&self) -> Result<(), AuthError> {
        let observed = self.current().await;

        if let Some(credential) = &observed {
            if self.validate(credential).await? {
                return Ok(());
            }
            info!(
                generation = credential.generation(),
                age_secs = credential.age().num_seconds(),
                "App access token invalid, refreshing"
            );
        } else {
            debug!("No app access token yet, acquiring");
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        let observed_generation = observed.as_ref().map(AppCredential::generation);
        let current_generation = self.current.read().await.as_ref().map(AppCredential::generation);
        if current_generation != observed_generation {
            debug!(?current_generation, "Token already refreshed by another request");
            return Ok(());
        }

        self.acquire_locked().await.map(|_| ())
    }
}

#[async_trait]
impl CredentialSource for TwitchCredentialStore {
    async fn ensure_valid(&self) -> Result<(), AuthError> {
        TwitchCredentialStore::ensure_valid(self).await
    }

    async fn auth_headers(&self) -> Result<HeaderMap, AuthError> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|c| c.headers().clone())
            .ok_or(AuthError::MissingCredential)
    }
}

impl std::fmt::Debug for TwitchCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitchCredentialStore")
            .field("endpoints", &self.endpoints)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
