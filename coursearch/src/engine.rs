//! Search engine over a live corpus provider.
//!
//! [`SearchEngine`] is the integration surface for transport layers: it
//! gates every call on corpus readiness (an unready corpus yields empty
//! results, never stale data), reads exactly one snapshot per query, clamps
//! limits to the transport bounds, and dispatches on the requested
//! [`Algorithm`]. The free functions in the crate root serve callers that
//! manage their own corpus slice.

use std::sync::Arc;

use coursearch_core::{
    Algorithm, AutocompleteHit, CorpusProvider, CorpusSnapshot, SearchHit, SearchOptions, filter,
};
use coursearch_fusion::{FusionConfig, rank_hybrid, rank_routed};
use coursearch_rank::{autocomplete, rank_bm25, rank_fuzzy};
use tracing::debug;

/// Search limits clamp to `[1, MAX_SEARCH_LIMIT]`.
pub const MAX_SEARCH_LIMIT: usize = 100;
/// Autocomplete limits clamp to `[1, MAX_AUTOCOMPLETE_LIMIT]`.
pub const MAX_AUTOCOMPLETE_LIMIT: usize = 50;

/// Clamps a caller-supplied search limit to the transport bounds.
#[must_use]
pub fn clamp_search_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}

/// Clamps a caller-supplied autocomplete limit to the transport bounds.
#[must_use]
pub fn clamp_autocomplete_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_AUTOCOMPLETE_LIMIT)
}

/// Ranking engine bound to a corpus provider.
#[derive(Debug)]
pub struct SearchEngine<P: CorpusProvider> {
    provider: P,
    fusion: FusionConfig,
}

impl<P: CorpusProvider> SearchEngine<P> {
    /// Creates an engine reading from `provider`, with fusion weights taken
    /// from the environment when overridden.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            fusion: FusionConfig::default().with_env_overrides(),
        }
    }

    /// Whether the underlying corpus has been published.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.provider.is_ready()
    }

    /// Ranked search with an explicit algorithm selector.
    ///
    /// The transport default is [`Algorithm::Hybrid`], which always runs
    /// both scorers and fuses.
    #[must_use]
    pub fn search(
        &self,
        query: &str,
        algorithm: Algorithm,
        limit: usize,
        max_distance: Option<usize>,
        options: Option<&SearchOptions>,
    ) -> Vec<SearchHit> {
        let Some(snapshot) = self.ready_snapshot() else {
            return Vec::new();
        };
        let limit = clamp_search_limit(limit);
        let candidates = filter::candidates(snapshot.courses(), options);
        match algorithm {
            Algorithm::Bm25 => rank_bm25(&candidates, query, limit),
            Algorithm::Fuzzy => rank_fuzzy(&candidates, query, limit, max_distance),
            Algorithm::Hybrid => {
                rank_hybrid(&candidates, query, limit, max_distance, self.fusion)
            }
        }
    }

    /// Ranked search that routes between scorers by query shape.
    #[must_use]
    pub fn search_auto(
        &self,
        query: &str,
        limit: usize,
        max_distance: Option<usize>,
        options: Option<&SearchOptions>,
    ) -> Vec<SearchHit> {
        let Some(snapshot) = self.ready_snapshot() else {
            return Vec::new();
        };
        let limit = clamp_search_limit(limit);
        let candidates = filter::candidates(snapshot.courses(), options);
        rank_routed(&candidates, query, limit, max_distance, self.fusion)
    }

    /// Autocomplete suggestions for incremental input.
    #[must_use]
    pub fn autocomplete(
        &self,
        query: &str,
        limit: usize,
        options: Option<&SearchOptions>,
    ) -> Vec<AutocompleteHit> {
        let Some(snapshot) = self.ready_snapshot() else {
            return Vec::new();
        };
        let limit = clamp_autocomplete_limit(limit);
        autocomplete(snapshot.courses(), query, limit, options)
    }

    fn ready_snapshot(&self) -> Option<Arc<CorpusSnapshot>> {
        if !self.provider.is_ready() {
            debug!(target: "coursearch.engine", "corpus not ready, returning empty");
            return None;
        }
        Some(self.provider.snapshot())
    }
}
