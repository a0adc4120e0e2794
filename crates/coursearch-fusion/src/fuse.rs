//! Weighted fusion of BM25F and fuzzy rankings.
//!
//! When hybrid search is requested explicitly, both scorers always run with
//! an enlarged candidate limit and their results are merged by course code:
//!
//! ```text
//! combined = bm25_weight · norm_bm25 + fuzzy_weight · fuzzy
//! ```
//!
//! capped at 1.0 when a course appears in both sets. A rank micro-adjustment
//! (1e-12 per position) then makes every score strictly unique for consumers
//! that cannot tolerate ties, without affecting user-visible order. Fusion
//! failure is contained: the caller falls back to BM25-only results.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use coursearch_core::{
    Course, SearchError, SearchHit, SearchOptions, SearchResult, filter,
};
use coursearch_rank::{rank_bm25, rank_fuzzy};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::normalize::normalize_bm25_scores;

/// Per-rank score decrement guaranteeing strict uniqueness.
const RANK_ADJUSTMENT_SCALE: f64 = 1e-12;

/// Both scorers fetch `limit * CANDIDATE_MULTIPLIER` candidates for merging.
const CANDIDATE_MULTIPLIER: usize = 2;

/// Fusion weights for the hybrid scorer.
///
/// # Environment Variable Overrides
///
/// | Variable                  | Field          | Default |
/// |---------------------------|----------------|---------|
/// | `COURSEARCH_BM25_WEIGHT`  | `bm25_weight`  | `0.6`   |
/// | `COURSEARCH_FUZZY_WEIGHT` | `fuzzy_weight` | `0.4`   |
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Weight of the normalized BM25 contribution.
    pub bm25_weight: f64,
    /// Weight of the fuzzy contribution (already in `[0, 1]`).
    pub fuzzy_weight: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            bm25_weight: 0.6,
            fuzzy_weight: 0.4,
        }
    }
}

impl FusionConfig {
    /// Load overrides from environment variables.
    ///
    /// Only overrides fields whose variables are set; invalid values are
    /// silently ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("COURSEARCH_BM25_WEIGHT")
            && let Ok(w) = val.parse::<f64>()
            && (0.0..=1.0).contains(&w)
        {
            self.bm25_weight = w;
        }
        if let Ok(val) = std::env::var("COURSEARCH_FUZZY_WEIGHT")
            && let Ok(w) = val.parse::<f64>()
            && (0.0..=1.0).contains(&w)
        {
            self.fuzzy_weight = w;
        }
        self
    }

    fn validate(self) -> SearchResult<Self> {
        let valid = self.bm25_weight.is_finite()
            && self.fuzzy_weight.is_finite()
            && self.bm25_weight >= 0.0
            && self.fuzzy_weight >= 0.0;
        if valid {
            Ok(self)
        } else {
            Err(SearchError::FusionFailed {
                detail: format!(
                    "invalid fusion weights bm25={} fuzzy={}",
                    self.bm25_weight, self.fuzzy_weight
                ),
            })
        }
    }
}

/// Hybrid search over a corpus with optional pre-scoring filters.
#[must_use]
pub fn search_hybrid(
    courses: &[Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
    options: Option<&SearchOptions>,
) -> Vec<SearchHit> {
    let candidates = filter::candidates(courses, options);
    rank_hybrid(&candidates, query, limit, max_distance, FusionConfig::default())
}

/// Hybrid search over a pre-filtered candidate set.
///
/// Always runs both scorers; the implicit routing heuristics apply only
/// when no algorithm was requested (see `route`). Falls back to BM25-only
/// results when fusion fails.
#[must_use]
#[instrument(
    name = "coursearch::hybrid",
    skip(candidates, query),
    fields(query_len = query.len(), limit, candidate_count = candidates.len())
)]
pub fn rank_hybrid(
    candidates: &[&Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
    config: FusionConfig,
) -> Vec<SearchHit> {
    let trimmed = query.trim();
    if trimmed.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let enlarged = (limit * CANDIDATE_MULTIPLIER).max(1);
    let bm25 = rank_bm25(candidates, trimmed, enlarged);
    let fuzzy = rank_fuzzy(candidates, trimmed, enlarged, max_distance);
    debug!(
        target: "coursearch.fuse",
        bm25_count = bm25.len(),
        fuzzy_count = fuzzy.len(),
        "fusing scorer outputs"
    );

    match fuse(bm25, fuzzy, limit, config) {
        Ok(hits) => hits,
        Err(error) => {
            warn!(target: "coursearch.fuse", %error, "falling back to BM25-only");
            rank_bm25(candidates, trimmed, limit)
        }
    }
}

/// Merges the two result sets into a single ranking.
///
/// BM25 scores are min-max normalized first; fuzzy scores are already in
/// `[0, 1]`. Courses present in both sets sum their weighted contributions,
/// capped at 1.0. Non-finite contributions are skipped.
pub fn fuse(
    bm25: Vec<SearchHit>,
    fuzzy: Vec<SearchHit>,
    limit: usize,
    config: FusionConfig,
) -> SearchResult<Vec<SearchHit>> {
    let config = config.validate()?;

    let mut normalized = bm25;
    normalize_bm25_scores(&mut normalized);

    let mut merged: HashMap<String, SearchHit> =
        HashMap::with_capacity(normalized.len() + fuzzy.len());

    for mut hit in normalized {
        if hit.code.trim().is_empty() {
            continue;
        }
        let weighted = hit.score * config.bm25_weight;
        if !weighted.is_finite() {
            continue;
        }
        hit.score = weighted;
        merged.insert(hit.code.clone(), hit);
    }

    for mut hit in fuzzy {
        if hit.code.trim().is_empty() {
            continue;
        }
        let weighted = hit.score * config.fuzzy_weight;
        if !weighted.is_finite() {
            continue;
        }
        match merged.entry(hit.code.clone()) {
            Entry::Occupied(mut entry) => {
                let combined = entry.get().score + weighted;
                entry.get_mut().score = combined.clamp(0.0, 1.0);
            }
            Entry::Vacant(entry) => {
                hit.score = weighted;
                entry.insert(hit);
            }
        }
    }

    let mut hits: Vec<SearchHit> = merged.into_values().collect();
    hits.sort_by(SearchHit::cmp_by_rank);

    for (rank, hit) in hits.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let adjusted = hit.score - rank as f64 * RANK_ADJUSTMENT_SCALE;
        hit.score = adjusted.clamp(0.0, 1.0);
    }

    hits.truncate(limit);
    Ok(hits)
}
