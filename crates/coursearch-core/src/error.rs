//! Unified error type for the coursearch ranking pipeline.
//!
//! Every variant includes an actionable message guiding the consumer toward
//! resolution. The search entry points recover locally from almost everything
//! (empty query → empty result, per-document scoring failure → document
//! discarded, fusion failure → BM25-only fallback), so these errors surface
//! only at ingest boundaries and inside contained fallback paths.

/// Unified error type covering the failure modes of the coursearch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A course code appeared more than once during strict ingest.
    #[error(
        "Duplicate course code {code} in corpus. Codes must be unique; use CorpusSnapshot::new to deduplicate instead."
    )]
    DuplicateCode {
        /// The offending course code.
        code: String,
    },

    /// The corpus has not been published yet.
    #[error("Corpus not ready. Publish a snapshot via SharedCorpus::publish before searching.")]
    CorpusNotReady,

    /// Hybrid fusion produced an unusable intermediate state.
    ///
    /// Contained by the hybrid search path, which falls back to BM25-only
    /// results. Surfaced only so the fallback can log what happened.
    #[error("Hybrid fusion failed: {detail}. Falling back to BM25-only results.")]
    FusionFailed {
        /// Nature of the failure.
        detail: String,
    },

    /// A programme tag string did not match any known programme.
    #[error("Unknown programme tag {value:?}. Expected one of the known programme prefixes (LOG, INF, MAT, ...).")]
    UnknownProgramme {
        /// The unrecognized input.
        value: String,
    },

    /// An algorithm selector string did not match any known algorithm.
    #[error("Unknown algorithm {value:?}. Expected one of: bm25, fuzzy, hybrid.")]
    UnknownAlgorithm {
        /// The unrecognized input.
        value: String,
    },
}

/// Convenience alias used across all coursearch crates.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = SearchError::DuplicateCode {
            code: "MAT380".to_owned(),
        };
        assert!(err.to_string().contains("MAT380"));

        let err = SearchError::UnknownProgramme {
            value: "ZZZ".to_owned(),
        };
        assert!(err.to_string().contains("ZZZ"));
    }

    #[test]
    fn fusion_failure_mentions_fallback() {
        let err = SearchError::FusionFailed {
            detail: "non-finite combined score".to_owned(),
        };
        assert!(err.to_string().contains("BM25-only"));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
