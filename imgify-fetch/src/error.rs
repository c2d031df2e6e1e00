//! Lookup error types.

use reqwest::StatusCode;
use thiserror::Error;

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success status code.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status returned by the server.
        status: StatusCode,
        /// Requested URL.
        url: String,
    },

    /// Body did not match the expected schema.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// Returns the status code if the server answered with a non-success code.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            _ => None,
        }
    }
}

// ============================================================================
// Auth Error
// ============================================================================

/// Failure to acquire or validate the app credential.
///
/// Unlike [`LookupError`], this is fatal for a resolution: without a valid
/// credential the primary provider cannot be queried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token or validation request failed at the transport level.
    #[error("Credential request failed: {0}")]
    Request(#[source] HttpError),

    /// Token endpoint rejected the client id/secret.
    #[error("Token endpoint rejected client credentials (HTTP {status}): {message}")]
    Rejected {
        /// Status returned by the token endpoint.
        status: StatusCode,
        /// Provider message, if any.
        message: String,
    },

    /// Token endpoint answered 2xx with an unusable body.
    #[error("Malformed token response: {0}")]
    MalformedResponse(String),

    /// Token cannot be placed in a header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// No credential has been acquired yet.
    #[error("No app credential available")]
    MissingCredential,
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Request(HttpError::Request(err))
    }
}

// ============================================================================
// Lookup Error
// ============================================================================

/// A single provider failed to answer a lookup.
///
/// The cascade treats every variant as "no match from this provider" and
/// moves on to the next one.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Authenticated provider had no usable credential.
    #[error("Credential unavailable: {0}")]
    Credential(#[from] AuthError),

    /// Response parsed but violated the provider's documented shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Http(HttpError::Request(err))
    }
}

// ============================================================================
// Directory Error
// ============================================================================

/// Failure to turn a channel name into a channel id.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The platform has no channel with this login.
    #[error("Channel not found: {0}")]
    NotFound(String),

    /// The lookup itself failed.
    #[error("Channel lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = HttpError::Status {
            status: StatusCode::NOT_FOUND,
            url: "https://api.betterttv.net/3/cached/users/twitch/1".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(HttpError::InvalidUrl("x".to_string()).status(), None);
    }

    #[test]
    fn test_lookup_error_is_transparent_over_http() {
        let err = LookupError::from(HttpError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            url: "https://api.frankerfacez.com/v1/set/global".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "HTTP 503 Service Unavailable from https://api.frankerfacez.com/v1/set/global"
        );
    }
}
