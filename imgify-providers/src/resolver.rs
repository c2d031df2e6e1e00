//! Emote resolution.
//!
//! [`EmoteResolver`] ties the credential, the channel directory and the
//! provider cascade together:
//!
//! 1. Make sure the app credential is valid.
//! 2. For channel requests, resolve the channel name to an id.
//! 3. Query providers in precedence order; the first match wins.
//!
//! Credential and channel failures abort the resolution. Provider failures
//! only count as "no match" from that provider.

use std::sync::Arc;
use std::time::Duration;

use imgify_core::{Channel, EmoteMatch, EmoteQuery};
use imgify_fetch::{
    AuthError, Cascade, CascadeOutcome, ChannelDirectory, CredentialSource, DirectoryError,
    HttpClient, HttpError, LookupError, ProviderAdapter, host::http::DEFAULT_TIMEOUT_SECS,
};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::registry::{Endpoints, ProviderRegistry};
use crate::twitch::{TwitchChannelDirectory, TwitchCredentialStore};

// ============================================================================
// Errors
// ============================================================================

/// A resolution that could not produce an answer.
///
/// "No provider has this emote" is not an error; it is
/// [`EmoteMatch::NotFound`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The app credential could not be acquired or validated.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The channel name does not exist.
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// The channel directory could not answer.
    #[error("Channel lookup failed: {0}")]
    ChannelLookup(#[source] LookupError),
}

impl From<DirectoryError> for ResolveError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(name) => ResolveError::ChannelNotFound(name),
            DirectoryError::Lookup(e) => ResolveError::ChannelLookup(e),
        }
    }
}

/// Failure to assemble a resolver.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Neither a credential source nor client id/secret were given.
    #[error("Twitch client id and client secret are required")]
    MissingClientCredentials,

    /// The HTTP client could not be created.
    #[error("HTTP client error: {0}")]
    Http(#[from] HttpError),

    /// The seeded access token is unusable.
    #[error("Invalid access token: {0}")]
    Auth(#[from] AuthError),
}

// ============================================================================
// Requests and Results
// ============================================================================

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmoteRequest {
    /// An emote available in a broadcaster's channel.
    Channel {
        /// Channel login as typed.
        channel: String,
        /// Emote name as typed.
        emote: String,
    },
    /// A platform-wide emote.
    Global {
        /// Emote name as typed.
        emote: String,
    },
}

impl EmoteRequest {
    /// Channel-scoped request.
    pub fn channel(channel: impl Into<String>, emote: impl Into<String>) -> Self {
        Self::Channel {
            channel: channel.into(),
            emote: emote.into(),
        }
    }

    /// Global request.
    pub fn global(emote: impl Into<String>) -> Self {
        Self::Global {
            emote: emote.into(),
        }
    }

    /// The requested emote name.
    pub fn emote(&self) -> &str {
        match self {
            Self::Channel { emote, .. } | Self::Global { emote } => emote,
        }
    }
}

/// A completed resolution with per-provider detail.
#[derive(Debug)]
pub struct Resolution {
    /// The resolved channel, for channel requests.
    pub channel: Option<Channel>,
    /// What each provider answered.
    pub outcome: CascadeOutcome,
}

impl Resolution {
    /// The final answer.
    pub fn result(&self) -> &EmoteMatch {
        &self.outcome.result
    }

    /// Consumes the resolution, keeping only the answer.
    pub fn into_match(self) -> EmoteMatch {
        self.outcome.result
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves emote names to image URLs.
///
/// Cheap to share behind an `Arc`; concurrent resolutions share one
/// credential.
pub struct EmoteResolver {
    credentials: Arc<dyn CredentialSource>,
    directory: Arc<dyn ChannelDirectory>,
    cascade: Cascade,
}

impl EmoteResolver {
    /// Creates a resolver from its parts.
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        directory: Arc<dyn ChannelDirectory>,
        cascade: Cascade,
    ) -> Self {
        Self {
            credentials,
            directory,
            cascade,
        }
    }

    /// Creates a builder wired to the public Twitch, BetterTTV and
    /// FrankerFaceZ services.
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// The provider cascade.
    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Resolves a request and reports every provider attempt.
    #[instrument(skip(self))]
    pub async fn resolve(&self, request: &EmoteRequest) -> Result<Resolution, ResolveError> {
        self.credentials.ensure_valid().await?;

        let (channel, query) = match request {
            EmoteRequest::Channel { channel, emote } => {
                let channel = self.directory.resolve(channel).await?;
                debug!(login = %channel.login, id = %channel.id, "Channel resolved");
                let query = EmoteQuery::channel(channel.id.clone(), emote.as_str());
                (Some(channel), query)
            }
            EmoteRequest::Global { emote } => (None, EmoteQuery::global(emote.as_str())),
        };

        let outcome = self.cascade.execute(&query).await;
        match outcome.matched_provider() {
            Some(provider) => info!(%provider, "Emote resolved"),
            None => info!(attempts = outcome.attempts_count(), "Emote not found"),
        }

        Ok(Resolution { channel, outcome })
    }

    /// Resolves a channel-scoped emote.
    pub async fn resolve_channel_emote(
        &self,
        channel_name: &str,
        emote_name: &str,
    ) -> Result<EmoteMatch, ResolveError> {
        self.resolve(&EmoteRequest::channel(channel_name, emote_name))
            .await
            .map(Resolution::into_match)
    }

    /// Resolves a global emote.
    pub async fn resolve_global_emote(&self, emote_name: &str) -> Result<EmoteMatch, ResolveError> {
        self.resolve(&EmoteRequest::global(emote_name))
            .await
            .map(Resolution::into_match)
    }
}

impl std::fmt::Debug for EmoteResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmoteResolver")
            .field("cascade", &self.cascade)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Resolver Builder
// ============================================================================

/// Builder for an [`EmoteResolver`].
///
/// Any part left unset is built from the Twitch client credentials and the
/// configured endpoints.
pub struct ResolverBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    access_token: Option<String>,
    endpoints: Endpoints,
    timeout: Duration,
    http: Option<HttpClient>,
    credentials: Option<Arc<dyn CredentialSource>>,
    directory: Option<Arc<dyn ChannelDirectory>>,
    adapters: Option<Vec<Arc<dyn ProviderAdapter>>>,
}

impl ResolverBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            access_token: None,
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http: None,
            credentials: None,
            directory: None,
            adapters: None,
        }
    }

    /// Sets the Twitch application credentials.
    pub fn client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Seeds a previously issued app access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the provider endpoints.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the HTTP timeout. Ignored when an HTTP client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the HTTP client.
    pub fn http(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Replaces the Twitch credential store.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Replaces the channel directory.
    pub fn directory(mut self, directory: Arc<dyn ChannelDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Replaces the provider adapters. They are still queried in precedence
    /// order.
    pub fn adapters(mut self, adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        self.adapters = Some(adapters);
        self
    }

    /// Builds the resolver.
    pub fn build(self) -> Result<EmoteResolver, BuildError> {
        let http = match self.http {
            Some(http) => http,
            None => HttpClient::with_timeout(self.timeout)?,
        };

        let credentials: Arc<dyn CredentialSource> = match self.credentials {
            Some(credentials) => credentials,
            None => {
                let (Some(client_id), Some(client_secret)) = (self.client_id, self.client_secret)
                else {
                    return Err(BuildError::MissingClientCredentials);
                };
                let mut store = TwitchCredentialStore::new(
                    http.clone(),
                    self.endpoints.twitch.clone(),
                    client_id,
                    client_secret,
                );
                if let Some(token) = self.access_token {
                    store = store.with_access_token(token)?;
                }
                Arc::new(store)
            }
        };

        let directory = self.directory.unwrap_or_else(|| {
            Arc::new(TwitchChannelDirectory::new(
                http.clone(),
                self.endpoints.twitch.clone(),
                Arc::clone(&credentials),
            ))
        });

        let adapters = self.adapters.unwrap_or_else(|| {
            ProviderRegistry::adapters(&http, &self.endpoints, Arc::clone(&credentials))
        });

        Ok(EmoteResolver::new(credentials, directory, Cascade::new(adapters)))
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use imgify_core::{ChannelId, ProviderKind};
    use reqwest::header::HeaderMap;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ------------------------------------------------------------------------
    // Fakes
    // ------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeCredentials {
        reject: bool,
        validations: AtomicUsize,
    }

    #[async_trait]
    impl CredentialSource for FakeCredentials {
        async fn ensure_valid(&self) -> Result<(), AuthError> {
            self.validations.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Err(AuthError::MissingCredential)
            } else {
                Ok(())
            }
        }

        async fn auth_headers(&self) -> Result<HeaderMap, AuthError> {
            Ok(HeaderMap::new())
        }
    }

    #[derive(Default)]
    struct FakeDirectory {
        channels: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl FakeDirectory {
        fn with(login: &str, id: &str) -> Self {
            Self {
                channels: HashMap::from([(login.to_string(), id.to_string())]),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChannelDirectory for FakeDirectory {
        async fn resolve(&self, channel_name: &str) -> Result<Channel, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let login = channel_name.to_lowercase();
            self.channels
                .get(&login)
                .map(|id| Channel::new(login.clone(), ChannelId::parse(id).unwrap()))
                .ok_or_else(|| DirectoryError::NotFound(channel_name.to_string()))
        }
    }

    /// Serves fixed emotes; `None` scope means global.
    struct FakeAdapter {
        kind: ProviderKind,
        emotes: Vec<(Option<&'static str>, &'static str, &'static str)>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FakeAdapter {
        fn new(kind: ProviderKind) -> Self {
            Self {
                kind,
                emotes: Vec::new(),
                fail: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn channel_emote(mut self, channel_id: &'static str, name: &'static str, url: &'static str) -> Self {
            self.emotes.push((Some(channel_id), name, url));
            self
        }

        fn global_emote(mut self, name: &'static str, url: &'static str) -> Self {
            self.emotes.push((None, name, url));
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn find(&self, scope: Option<&str>, name: &str) -> Result<EmoteMatch, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError::InvalidResponse("boom".to_string()));
            }
            Ok(self
                .emotes
                .iter()
                .find(|(s, n, _)| *s == scope && imgify_core::names_match(n, name))
                .map(|(_, _, url)| (*url).to_string())
                .into())
        }
    }

    #[async_trait]
    impl ProviderAdapter for FakeAdapter {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn lookup_channel_emote(
            &self,
            channel_id: &ChannelId,
            name: &str,
        ) -> Result<EmoteMatch, LookupError> {
            self.find(Some(channel_id.as_str()), name)
        }

        async fn lookup_global_emote(&self, name: &str) -> Result<EmoteMatch, LookupError> {
            self.find(None, name)
        }
    }

    struct Harness {
        resolver: EmoteResolver,
        credentials: Arc<FakeCredentials>,
        directory: Arc<FakeDirectory>,
        calls: [Arc<AtomicUsize>; 3],
    }

    fn harness(
        credentials: FakeCredentials,
        directory: FakeDirectory,
        adapters: [FakeAdapter; 3],
    ) -> Harness {
        let credentials = Arc::new(credentials);
        let directory = Arc::new(directory);
        let calls = [
            Arc::clone(&adapters[0].calls),
            Arc::clone(&adapters[1].calls),
            Arc::clone(&adapters[2].calls),
        ];
        let adapters: Vec<Arc<dyn ProviderAdapter>> = adapters
            .into_iter()
            .map(|a| Arc::new(a) as Arc<dyn ProviderAdapter>)
            .collect();
        let resolver = EmoteResolver::builder()
            .credentials(credentials.clone())
            .directory(directory.clone())
            .adapters(adapters)
            .build()
            .unwrap();

        Harness {
            resolver,
            credentials,
            directory,
            calls,
        }
    }

    fn calls(h: &Harness) -> [usize; 3] {
        [
            h.calls[0].load(Ordering::SeqCst),
            h.calls[1].load(Ordering::SeqCst),
            h.calls[2].load(Ordering::SeqCst),
        ]
    }

    // ------------------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_channel_emote_from_primary() {
        let h = harness(
            FakeCredentials::default(),
            FakeDirectory::with("somechannel", "1001"),
            [
                FakeAdapter::new(ProviderKind::Twitch).channel_emote(
                    "1001",
                    "PogChamp",
                    "https://static-cdn.jtvnw.net/emoticons/v1/305954156/3.0",
                ),
                FakeAdapter::new(ProviderKind::BetterTtv),
                FakeAdapter::new(ProviderKind::FrankerFaceZ),
            ],
        );

        let result = h
            .resolver
            .resolve_channel_emote("somechannel", "PogChamp")
            .await
            .unwrap();

        assert_eq!(
            result.url(),
            Some("https://static-cdn.jtvnw.net/emoticons/v1/305954156/3.0")
        );
        assert_eq!(calls(&h), [1, 0, 0]);
        assert_eq!(h.credentials.validations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_absent_everywhere_is_not_found() {
        let h = harness(
            FakeCredentials::default(),
            FakeDirectory::with("somechannel", "1001"),
            [
                FakeAdapter::new(ProviderKind::Twitch),
                FakeAdapter::new(ProviderKind::BetterTtv),
                FakeAdapter::new(ProviderKind::FrankerFaceZ),
            ],
        );

        let resolution = h
            .resolver
            .resolve(&EmoteRequest::channel("somechannel", "NoSuchEmote"))
            .await
            .unwrap();

        assert_eq!(resolution.result(), &EmoteMatch::NotFound);
        assert_eq!(resolution.channel.unwrap().id.as_str(), "1001");
        assert_eq!(resolution.outcome.attempts_count(), 3);
        assert_eq!(calls(&h), [1, 1, 1]);
    }

    #[tokio::test]
    async fn test_unknown_channel_skips_providers() {
        let h = harness(
            FakeCredentials::default(),
            FakeDirectory::default(),
            [
                FakeAdapter::new(ProviderKind::Twitch),
                FakeAdapter::new(ProviderKind::BetterTtv),
                FakeAdapter::new(ProviderKind::FrankerFaceZ),
            ],
        );

        let err = h
            .resolver
            .resolve_channel_emote("ghost", "Kappa")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::ChannelNotFound(name) if name == "ghost"));
        assert_eq!(calls(&h), [0, 0, 0]);
    }

    #[tokio::test]
    async fn test_global_emote_from_secondary() {
        let h = harness(
            FakeCredentials::default(),
            FakeDirectory::default(),
            [
                FakeAdapter::new(ProviderKind::Twitch),
                FakeAdapter::new(ProviderKind::BetterTtv)
                    .global_emote("Kappa", "https://cdn.betterttv.net/emote/kappa/3x"),
                FakeAdapter::new(ProviderKind::FrankerFaceZ)
                    .global_emote("Kappa", "https://cdn.frankerfacez.com/emote/kappa/4"),
            ],
        );

        let resolution = h
            .resolver
            .resolve(&EmoteRequest::global("Kappa"))
            .await
            .unwrap();

        assert_eq!(
            resolution.result().url(),
            Some("https://cdn.betterttv.net/emote/kappa/3x")
        );
        assert_eq!(resolution.outcome.matched_provider(), Some(ProviderKind::BetterTtv));
        assert!(resolution.channel.is_none());
        assert_eq!(calls(&h), [1, 1, 0]);
        assert_eq!(h.directory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_wins_over_secondary() {
        let h = harness(
            FakeCredentials::default(),
            FakeDirectory::with("somechannel", "1001"),
            [
                FakeAdapter::new(ProviderKind::FrankerFaceZ).channel_emote("1001", "LUL", "ffz"),
                FakeAdapter::new(ProviderKind::BetterTtv).channel_emote("1001", "LUL", "bttv"),
                FakeAdapter::new(ProviderKind::Twitch).channel_emote("1001", "lul", "twitch"),
            ],
        );

        let result = h
            .resolver
            .resolve_channel_emote("SomeChannel", "LUL")
            .await
            .unwrap();

        assert_eq!(result.url(), Some("twitch"));
    }

    #[tokio::test]
    async fn test_failing_provider_is_skipped() {
        let h = harness(
            FakeCredentials::default(),
            FakeDirectory::default(),
            [
                FakeAdapter::new(ProviderKind::Twitch).failing(),
                FakeAdapter::new(ProviderKind::BetterTtv).failing(),
                FakeAdapter::new(ProviderKind::FrankerFaceZ).global_emote("ZrehplaR", "ffz"),
            ],
        );

        let resolution = h
            .resolver
            .resolve(&EmoteRequest::global("zrehplar"))
            .await
            .unwrap();

        assert_eq!(resolution.result().url(), Some("ffz"));
        assert_eq!(resolution.outcome.errors().len(), 2);
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_before_lookups() {
        let h = harness(
            FakeCredentials {
                reject: true,
                ..FakeCredentials::default()
            },
            FakeDirectory::with("somechannel", "1001"),
            [
                FakeAdapter::new(ProviderKind::Twitch),
                FakeAdapter::new(ProviderKind::BetterTtv),
                FakeAdapter::new(ProviderKind::FrankerFaceZ),
            ],
        );

        let err = h
            .resolver
            .resolve_channel_emote("somechannel", "Kappa")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Auth(_)));
        assert_eq!(h.directory.calls.load(Ordering::SeqCst), 0);
        assert_eq!(calls(&h), [0, 0, 0]);
    }

    #[tokio::test]
    async fn test_directory_failure_is_channel_lookup_error() {
        struct BrokenDirectory;

        #[async_trait]
        impl ChannelDirectory for BrokenDirectory {
            async fn resolve(&self, _channel_name: &str) -> Result<Channel, DirectoryError> {
                Err(DirectoryError::Lookup(LookupError::InvalidResponse(
                    "bad".to_string(),
                )))
            }
        }

        let resolver = EmoteResolver::builder()
            .credentials(Arc::new(FakeCredentials::default()))
            .directory(Arc::new(BrokenDirectory))
            .adapters(Vec::new())
            .build()
            .unwrap();

        let err = resolver
            .resolve_channel_emote("somechannel", "Kappa")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::ChannelLookup(_)));
    }

    #[test]
    fn test_build_requires_client_credentials() {
        let err = EmoteResolver::builder().build().unwrap_err();
        assert!(matches!(err, BuildError::MissingClientCredentials));
    }

    #[test]
    fn test_build_default_cascade_order() {
        let resolver = EmoteResolver::builder()
            .client_credentials("id", "secret")
            .build()
            .unwrap();
        let kinds: Vec<_> = resolver
            .cascade()
            .adapter_info()
            .into_iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds, ProviderKind::all());
    }

    #[test]
    fn test_request_emote_accessor() {
        assert_eq!(EmoteRequest::channel("c", "Kappa").emote(), "Kappa");
        assert_eq!(EmoteRequest::global("Keepo").emote(), "Keepo");
    }
}
