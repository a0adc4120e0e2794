//! Deterministic result ordering and truncation.
//!
//! Every scorer funnels through these helpers so all responses share the same
//! contract: scores monotone non-increasing by position, ties broken by code
//! ascending, output truncated to the requested limit.

use crate::types::{AutocompleteHit, SearchHit};

/// Sorts hits by (score descending, code ascending) and truncates to `limit`.
pub fn sort_and_truncate(hits: &mut Vec<SearchHit>, limit: usize) {
    hits.sort_by(SearchHit::cmp_by_rank);
    hits.truncate(limit);
}

/// Autocomplete counterpart of [`sort_and_truncate`].
pub fn sort_and_truncate_suggestions(hits: &mut Vec<AutocompleteHit>, limit: usize) {
    hits.sort_by(AutocompleteHit::cmp_by_rank);
    hits.truncate(limit);
}
