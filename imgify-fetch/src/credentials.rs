//! App credential abstraction.
//!
//! The primary provider needs a client-level bearer token. The concrete
//! store lives with that provider; adapters and the resolver only see this
//! trait, so tests can inject a fake.

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::AuthError;

/// Shared source of the app credential.
///
/// Implementations own their locking. All methods take `&self` and may be
/// called concurrently from independent resolutions.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Makes sure a valid credential is held, acquiring or refreshing it
    /// when necessary.
    ///
    /// Must be called before any authenticated request. When the current
    /// credential is still valid this costs a single validation round trip.
    async fn ensure_valid(&self) -> Result<(), AuthError>;

    /// Headers for authenticated requests (`Authorization` and `Client-Id`).
    ///
    /// Returns [`AuthError::MissingCredential`] if nothing has been acquired.
    async fn auth_headers(&self) -> Result<HeaderMap, AuthError>;
}
