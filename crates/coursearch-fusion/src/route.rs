//! Implicit algorithm routing for the default-algorithm path.
//!
//! When the caller names an algorithm, that algorithm runs: explicit hybrid
//! always fuses both scorers. These heuristics apply only when the engine
//! chooses for itself:
//!
//! | Query | Strategy |
//! |-------|----------|
//! | contains a digit and ≤ 6 chars, or single word of 3–10 chars | fuzzy |
//! | longer than 20 chars, or 4+ words | BM25 only |
//! | everything else | hybrid |
//!
//! Course-code-shaped input leans fuzzy (typo tolerance on short codes);
//! long natural-language phrases gain nothing from edit distance and go
//! straight to BM25F.

use std::fmt;

use coursearch_core::{Course, SearchHit, SearchOptions, filter};
use coursearch_rank::{rank_bm25, rank_fuzzy};
use tracing::debug;

use crate::fuse::{FusionConfig, rank_hybrid};

/// Queries at most this long with a digit route to fuzzy.
const FUZZY_CODE_MAX_LEN: usize = 6;
/// Single-word queries in this length range route to fuzzy.
const FUZZY_WORD_MIN_LEN: usize = 3;
const FUZZY_WORD_MAX_LEN: usize = 10;
/// Queries longer than this route to BM25 only.
const BM25_ONLY_MIN_LEN: usize = 21;
/// Queries with at least this many words route to BM25 only.
const BM25_ONLY_MIN_WORDS: usize = 4;

/// The scorer selected for an unrouted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Edit-distance scoring only.
    Fuzzy,
    /// BM25F scoring only.
    Bm25Only,
    /// Run both scorers and fuse.
    Hybrid,
}

impl Strategy {
    /// Selects a strategy from the query's surface characteristics.
    #[must_use]
    pub fn select(query: &str) -> Self {
        let trimmed = query.trim();
        let len = trimmed.chars().count();
        let words = trimmed.split_whitespace().count();
        let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());

        if (has_digit && len <= FUZZY_CODE_MAX_LEN)
            || (words == 1 && (FUZZY_WORD_MIN_LEN..=FUZZY_WORD_MAX_LEN).contains(&len))
        {
            Self::Fuzzy
        } else if len >= BM25_ONLY_MIN_LEN || words >= BM25_ONLY_MIN_WORDS {
            Self::Bm25Only
        } else {
            Self::Hybrid
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Bm25Only => write!(f, "bm25_only"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Default-path search: picks a strategy per query and dispatches.
#[must_use]
pub fn search(
    courses: &[Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
    options: Option<&SearchOptions>,
) -> Vec<SearchHit> {
    let candidates = filter::candidates(courses, options);
    rank_routed(&candidates, query, limit, max_distance, FusionConfig::default())
}

/// Default-path search over a pre-filtered candidate set.
#[must_use]
pub fn rank_routed(
    candidates: &[&Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
    config: FusionConfig,
) -> Vec<SearchHit> {
    let strategy = Strategy::select(query);
    debug!(
        target: "coursearch.route",
        %strategy,
        query_len = query.trim().len(),
        "routing query"
    );
    match strategy {
        Strategy::Fuzzy => rank_fuzzy(candidates, query, limit, max_distance),
        Strategy::Bm25Only => rank_bm25(candidates, query, limit),
        Strategy::Hybrid => rank_hybrid(candidates, query, limit, max_distance, config),
    }
}
