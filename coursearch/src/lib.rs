//! # coursearch
//!
//! Ranked search over university course records: field-weighted BM25
//! (BM25F), edit-distance fuzzy matching, and an adaptive hybrid of the two,
//! built on a French-leaning text analysis pipeline.
//!
//! Queries range from partial course codes (`"MAT"`) through misspelled
//! French words (`"algèbr"`) to multi-word phrases (`"structures de données
//! algorithmes"`); each is answered by a deterministic ranked list with
//! comparable scores.
//!
//! # Quick Start
//!
//! ```rust
//! use coursearch::prelude::*;
//!
//! let corpus = vec![
//!     Course::new(
//!         "MAT380",
//!         "MAT380 - Algèbre linéaire",
//!         "Introduction à l'algèbre linéaire et ses applications",
//!         Some(3),
//!     ),
//!     Course::new(
//!         "LOG100",
//!         "LOG100 - Introduction à la programmation",
//!         "Bases de la programmation orientée objet",
//!         Some(3),
//!     ),
//! ];
//!
//! let hits = coursearch::search_hybrid(&corpus, "algèbre", 10, None, None);
//! assert_eq!(hits[0].code, "MAT380");
//!
//! let suggestions = coursearch::autocomplete(&corpus, "LOG", 10, None);
//! assert_eq!(suggestions[0].code, "LOG100");
//! ```
//!
//! Long-running hosts publish snapshots through [`SharedCorpus`] and query
//! through a [`SearchEngine`], which adds the readiness gate and transport
//! limit clamps:
//!
//! ```rust
//! use std::sync::Arc;
//! use coursearch::prelude::*;
//!
//! let shared = Arc::new(SharedCorpus::new());
//! let engine = SearchEngine::new(Arc::clone(&shared));
//! assert!(engine.search("MAT380", Algorithm::Hybrid, 10, None, None).is_empty());
//!
//! shared.publish(CorpusSnapshot::new(vec![Course::new(
//!     "MAT380",
//!     "MAT380 - Algèbre linéaire",
//!     "",
//!     Some(3),
//! )]));
//! let hits = engine.search("MAT380", Algorithm::Hybrid, 10, None, None);
//! assert_eq!(hits[0].code, "MAT380");
//! ```
//!
//! # Architecture
//!
//! ```text
//!  Query ─► Analyzer (normalize · stem · stopwords · bigrams · acronyms)
//!            │
//!            ├─► BM25F scorer ──┐
//!            │                  ├─► Normalize ─► Weighted fuse ─► Sort & limit
//!            └─► Fuzzy scorer ──┘
//! ```
//!
//! ## Crate Layout
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | [`coursearch-core`](coursearch_core) | Types, errors, filtering, snapshots, query classification |
//! | [`coursearch-analyze`](coursearch_analyze) | French text analysis, document preprocessing |
//! | [`coursearch-rank`](coursearch_rank) | BM25F, fuzzy, and autocomplete scorers |
//! | [`coursearch-fusion`](coursearch_fusion) | Score normalization, hybrid fusion, routing |
//! | `coursearch` | Facade: public API, [`SearchEngine`], integration tests |
//!
//! # Guarantees
//!
//! For a fixed snapshot, query, and options: results are deterministic,
//! scores are finite, non-negative, and monotone non-increasing by position,
//! ties break by code ascending, every code appears at most once, and the
//! result never exceeds the requested limit. Scores are comparable only
//! within a single response.

pub mod engine;

pub use coursearch_core::{
    Algorithm, AutocompleteHit, CorpusProvider, CorpusSnapshot, Course, Programme, QueryShape,
    SearchError, SearchHit, SearchOptions, SearchResult, SharedCorpus, is_code_shaped,
};
pub use coursearch_analyze::{analyze_field, analyze_query};
pub use coursearch_core::tracing_config;
pub use coursearch_fusion::{FusionConfig, Strategy, search, search_hybrid};
pub use coursearch_rank::{autocomplete, search_bm25, search_fuzzy};
pub use engine::{
    MAX_AUTOCOMPLETE_LIMIT, MAX_SEARCH_LIMIT, SearchEngine, clamp_autocomplete_limit,
    clamp_search_limit,
};

/// Commonly used imports for consumers.
pub mod prelude {
    pub use crate::engine::SearchEngine;
    pub use coursearch_core::{
        Algorithm, AutocompleteHit, CorpusProvider, CorpusSnapshot, Course, Programme, SearchHit,
        SearchOptions, SharedCorpus,
    };
}
