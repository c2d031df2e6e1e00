//! Lookup cascade across providers.
//!
//! The cascade takes the provider adapters and queries them in precedence
//! order until one returns a match. A provider that fails is logged and
//! skipped; it never aborts the whole lookup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use imgify_core::{EmoteMatch, EmoteQuery, ProviderKind};
use tracing::{debug, info, instrument, warn};

use crate::adapter::{AdapterInfo, ProviderAdapter};

// ============================================================================
// Lookup Attempt
// ============================================================================

/// What happened when one provider was asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Provider returned a URL.
    Found,
    /// Provider answered without a match.
    NotFound,
    /// Provider could not answer; treated as no match.
    Failed(String),
}

/// Record of a single provider lookup.
#[derive(Debug, Clone)]
pub struct LookupAttempt {
    /// The provider that was queried.
    pub provider: ProviderKind,
    /// Result of the query.
    pub outcome: AttemptOutcome,
    /// How long the query took.
    pub duration: Duration,
}

impl LookupAttempt {
    /// Returns the error message if the provider failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            AttemptOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ============================================================================
// Cascade Outcome
// ============================================================================

/// The outcome of a cascade execution.
#[derive(Debug)]
pub struct CascadeOutcome {
    /// First match, or `NotFound`.
    pub result: EmoteMatch,
    /// Providers queried, in order.
    pub attempts: Vec<LookupAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl CascadeOutcome {
    fn not_found(attempts: Vec<LookupAttempt>, start: Instant) -> Self {
        Self {
            result: EmoteMatch::NotFound,
            attempts,
            duration: start.elapsed(),
        }
    }

    /// Returns true if a provider matched.
    pub fn is_found(&self) -> bool {
        self.result.is_found()
    }

    /// Returns the number of providers that were queried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the provider that produced the match, if any.
    pub fn matched_provider(&self) -> Option<ProviderKind> {
        self.attempts
            .iter()
            .find(|a| a.outcome == AttemptOutcome::Found)
            .map(|a| a.provider)
    }

    /// Returns all provider errors that occurred.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts.iter().filter_map(LookupAttempt::error).collect()
    }

    /// Returns true if every queried provider failed to answer.
    pub fn all_failed(&self) -> bool {
        !self.attempts.is_empty()
            && self
                .attempts
                .iter()
                .all(|a| matches!(a.outcome, AttemptOutcome::Failed(_)))
    }
}

// ============================================================================
// Cascade
// ============================================================================

/// Providers queried in fixed precedence order.
///
/// The order comes from [`ProviderKind::priority`] and cannot be overridden
/// by adapters or callers.
pub struct Cascade {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
}

impl Cascade {
    /// Creates a cascade over the given adapters.
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        let mut cascade = Self { adapters };
        cascade.sort_by_priority();
        cascade
    }

    /// Sorts adapters by priority (highest first). Stable for equal kinds.
    fn sort_by_priority(&mut self) {
        self.adapters
            .sort_by(|a, b| b.kind().priority().cmp(&a.kind().priority()));
    }

    /// Returns the number of adapters in the cascade.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if the cascade is empty.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Returns information about all adapters, in query order.
    pub fn adapter_info(&self) -> Vec<AdapterInfo> {
        self.adapters
            .iter()
            .map(|adapter| AdapterInfo::from_adapter(adapter.as_ref()))
            .collect()
    }

    /// Queries providers in order until one matches.
    #[instrument(skip(self, query), fields(emote = %query.name, providers = self.adapters.len()))]
    pub async fn execute(&self, query: &EmoteQuery) -> CascadeOutcome {
        let start = Instant::now();
        let mut attempts = Vec::with_capacity(self.adapters.len());

        if query.name.is_empty() {
            debug!("Empty emote name, nothing to look up");
            return CascadeOutcome::not_found(attempts, start);
        }

        for adapter in &self.adapters {
            let provider = adapter.kind();
            let attempt_start = Instant::now();
            debug!(provider = %adapter.id(), "Querying provider");

            match adapter.lookup(query).await {
                Ok(EmoteMatch::Found(url)) => {
                    let duration = attempt_start.elapsed();
                    info!(provider = %adapter.id(), duration = ?duration, url = %url, "Emote found");

                    attempts.push(LookupAttempt {
                        provider,
                        outcome: AttemptOutcome::Found,
                        duration,
                    });

                    return CascadeOutcome {
                        result: EmoteMatch::Found(url),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Ok(EmoteMatch::NotFound) => {
                    debug!(provider = %adapter.id(), "No match");
                    attempts.push(LookupAttempt {
                        provider,
                        outcome: AttemptOutcome::NotFound,
                        duration: attempt_start.elapsed(),
                    });
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    warn!(
                        provider = %adapter.id(),
                        error = %error,
                        duration = ?duration,
                        "Provider lookup failed, continuing"
                    );

                    attempts.push(LookupAttempt {
                        provider,
                        outcome: AttemptOutcome::Failed(error.to_string()),
                        duration,
                    });
                }
            }
        }

        let outcome = CascadeOutcome::not_found(attempts, start);
        if outcome.all_failed() {
            warn!("All providers failed");
        } else {
            debug!("Emote not found");
        }
        outcome
    }
}

impl std::fmt::Debug for Cascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cascade")
            .field("adapters", &self.adapter_info())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
