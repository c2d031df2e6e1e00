//! Configuration management.
//!
//! Settings come from a JSON file and are then overridden by environment
//! variables, so a deployment can keep secrets out of the file entirely.

use std::path::{Path, PathBuf};
use std::time::Duration;

use imgify_fetch::host::http::DEFAULT_TIMEOUT_SECS;
use imgify_providers::Endpoints;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable for the Twitch client id.
pub const ENV_CLIENT_ID: &str = "TWITCH_CLIENT_ID";
/// Environment variable for the Twitch client secret.
pub const ENV_CLIENT_SECRET: &str = "TWITCH_CLIENT_SECRET";
/// Environment variable for the chat gateway session token.
pub const ENV_GATEWAY_TOKEN: &str = "DISCORD_TOKEN";

const MASK: &str = "********";

// ============================================================================
// Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`AppConfig`].
    #[error("Invalid config {path}: {source}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A required setting is absent from both file and environment.
    #[error("Missing required setting: {0}")]
    MissingField(&'static str),
}

// ============================================================================
// Config Types
// ============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Twitch application credentials.
    #[serde(default)]
    pub twitch: TwitchConfig,
    /// Chat front end settings.
    #[serde(default)]
    pub chat: ChatConfig,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Provider endpoint overrides.
    #[serde(default)]
    pub endpoints: Endpoints,
}

/// Twitch application credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitchConfig {
    /// Application client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Application client secret.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Previously issued app token to try before minting a new one.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Chat front end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Session token for the chat gateway. Carried, never used by lookups.
    #[serde(default)]
    pub gateway_token: Option<String>,
    /// Prefix that marks a chat line as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_command_prefix() -> String {
    "^".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            gateway_token: None,
            command_prefix: default_command_prefix(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl AppConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("emote-imgify")
            .join("config.json")
    }

    /// Loads the file at `path`, or the default file when `path` is `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Empty values are ignored.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = get(ENV_CLIENT_ID) {
            debug!(var = ENV_CLIENT_ID, "Overriding from environment");
            self.twitch.client_id = Some(value);
        }
        if let Some(value) = get(ENV_CLIENT_SECRET) {
            debug!(var = ENV_CLIENT_SECRET, "Overriding from environment");
            self.twitch.client_secret = Some(value);
        }
        if let Some(value) = get(ENV_GATEWAY_TOKEN) {
            debug!(var = ENV_GATEWAY_TOKEN, "Overriding from environment");
            self.chat.gateway_token = Some(value);
        }
        self
    }

    /// Returns the Twitch client id and secret, which lookups require.
    pub fn client_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let id = non_empty(self.twitch.client_id.as_deref())
            .ok_or(ConfigError::MissingField("twitch.client_id"))?;
        let secret = non_empty(self.twitch.client_secret.as_deref())
            .ok_or(ConfigError::MissingField("twitch.client_secret"))?;
        Ok((id, secret))
    }

    /// HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// A copy with every secret masked, for display.
    #[must_use]
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        masked.twitch.client_secret = masked.twitch.client_secret.as_deref().map(mask);
        masked.twitch.access_token = masked.twitch.access_token.as_deref().map(mask);
        masked.chat.gateway_token = masked.chat.gateway_token.as_deref().map(mask);
        masked
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Masks a secret, keeping the last four characters of long values.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return MASK.to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{MASK}{tail}")
}

// ============================================================================
// Tests
// ============================================================================
