//! HTTP client with tracing and JSON helpers.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Status checking and schema-aware JSON decoding
//! - Endpoint URL construction from configurable base URLs

use reqwest::{Client, Response, header::HeaderMap};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Emote Imgify.
const USER_AGENT: &str = concat!("EmoteImgify/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Endpoint URLs
// ============================================================================

/// Joins a base URL and an endpoint path.
///
/// Bases are configurable (tests point them at a local server), so the result
/// is validated before any request is made.
pub fn endpoint_url(base: &str, path: &str) -> Result<Url, HttpError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| HttpError::InvalidUrl(format!("{joined}: {e}")))
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner })
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &Url) -> Result<Response, HttpError> {
        debug!("GET request");

        let response = self.inner.get(url.clone()).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with custom headers.
    #[instrument(skip(self, headers), fields(url = %url))]
    pub async fn get_with_headers(
        &self,
        url: &Url,
        headers: HeaderMap,
    ) -> Result<Response, HttpError> {
        debug!("GET request with headers");

        let response = self.inner.get(url.clone()).headers(headers).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request and decodes a JSON body.
    ///
    /// Non-success statuses become [`HttpError::Status`]; bodies that do not
    /// match `T` become [`HttpError::Decode`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        headers: Option<HeaderMap>,
    ) -> Result<T, HttpError> {
        let response = match headers {
            Some(headers) => self.get_with_headers(url, headers).await?,
            None => self.get(url).await?,
        };
        decode_json(url, response).await
    }

    /// Performs a POST request with form data.
    #[instrument(skip(self, form), fields(url = %url))]
    pub async fn post_form<T: serde::Serialize + ?Sized>(
        &self,
        url: &Url,
        form: &T,
    ) -> Result<Response, HttpError> {
        debug!("POST request with form data");

        let response = self.inner.post(url.clone()).form(form).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

/// Checks the status and decodes a JSON body.
pub async fn decode_json<T: DeserializeOwned>(
    url: &Url,
    response: Response,
) -> Result<T, HttpError> {
    let status = response.status();
    if !status.is_success() {
        return Err(HttpError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| HttpError::Decode {
        url: url.to_string(),
        source,
    })
}

// ============================================================================
// Tests
// ============================================================================
