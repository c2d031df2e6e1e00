//! Twitch channel directory.

use std::sync::Arc;

use async_trait::async_trait;
use imgify_core::{Channel, ChannelId};
use imgify_fetch::{
    ChannelDirectory, CredentialSource, DirectoryError, HttpClient, HttpError, LookupError,
};
use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::api::{HelixResponse, HelixUser, TwitchEndpoints};

/// Resolves logins through Helix `GET /helix/users`.
///
/// Twitch folds case itself; the login is sent as typed.
pub struct TwitchChannelDirectory {
    http: HttpClient,
    endpoints: TwitchEndpoints,
    credentials: Arc<dyn CredentialSource>,
}

impl TwitchChannelDirectory {
    /// Creates a directory sharing the app credential.
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
}

#[async_trait]
impl ChannelDirectory for TwitchChannelDirectory {
    #[instrument(skip(self))]
    async fn resolve(&self, channel_name: &str) -> Result<Channel, DirectoryError> {
        let login = channel_name.trim();
        if login.is_empty() {
            return Err(DirectoryError::NotFound(channel_name.to_string()));
        }

        let url = self.endpoints.users_url(login).map_err(LookupError::from)?;
        let headers = self
            .credentials
            .auth_headers()
            .await
            .map_err(LookupError::from)?;

        let users: HelixResponse<HelixUser> = match self.http.get_json(&url, Some(headers)).await {
            Ok(users) => users,
            // Helix answers 400 for logins that cannot exist (bad characters, too long).
            Err(HttpError::Status { status, .. }) if status == StatusCode::BAD_REQUEST => {
                return Err(DirectoryError::NotFound(login.to_string()));
            }
            Err(e) => return Err(LookupError::from(e).into()),
        };

        let user = users
            .data
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::NotFound(login.to_string()))?;

        let id = ChannelId::parse(&user.id)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        debug!(login = %user.login, id = %id, "Resolved channel");
        Ok(Channel::new(user.login, id))
    }
}

impl std::fmt::Debug for TwitchChannelDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitchChannelDirectory")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
