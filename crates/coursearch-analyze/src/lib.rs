//! French-leaning text analysis for the coursearch ranking engine.
//!
//! Converts raw course text and queries into index terms:
//!
//! 1. Normalize: lowercase, NFC, strip HTML tags/entities, collapse
//!    whitespace ([`normalize::normalize`])
//! 2. Mask non-alphanumerics and split letter↔digit boundaries, so
//!    `"GTI320"` yields `gti` and `320` ([`normalize::mask_and_split_boundaries`])
//! 3. Split on whitespace
//! 4. Stem each token with light French rules ([`stem::stem`])
//! 5. Drop stopwords, where the set covers surface forms and stems
//!    ([`stopwords::is_stopword`])
//! 6. Emit bigrams (`"tok1_tok2"`) alongside the unigrams
//!
//! Queries additionally get acronym expansion ([`acronyms::expansion_terms`])
//! and order-preserving deduplication. Expansion terms are appended after
//! bigram emission so they never form phantom phrases. Documents are never
//! expanded and never deduplicated (term frequencies need the repeats).
//!
//! The analyzer is a pure function of its input and the static
//! stopword/expansion tables.

use std::collections::HashSet;

pub mod acronyms;
pub mod document;
pub mod normalize;
pub mod stem;
pub mod stopwords;

pub use document::{CorpusStats, DocumentIndex, FieldIndex, index_candidates};

/// Separator joining adjacent tokens into a bigram term.
pub const BIGRAM_SEPARATOR: char = '_';

/// Analyzes one document field: unigram pipeline plus bigrams.
#[must_use]
pub fn analyze_field(text: &str) -> Vec<String> {
    let mut tokens = unigram_tokens(text);
    let pairs = bigrams(&tokens);
    tokens.extend(pairs);
    tokens
}

/// Analyzes a query: unigram pipeline, bigrams, acronym expansion, then
/// order-preserving deduplication.
#[must_use]
pub fn analyze_query(text: &str) -> Vec<String> {
    let unigrams = unigram_tokens(text);
    let mut tokens = unigrams.clone();
    tokens.extend(bigrams(&unigrams));
    for token in &unigrams {
        if let Some(terms) = acronyms::expansion_terms(token) {
            tokens.extend(terms.iter().map(|term| (*term).to_owned()));
        }
    }
    dedup_preserving_order(tokens)
}

/// Whether a term is a bigram (joined pair) rather than a unigram.
/// Bigram terms receive an IDF boost at scoring time.
#[must_use]
pub fn is_bigram(term: &str) -> bool {
    term.contains(BIGRAM_SEPARATOR)
}

/// Steps 1–5 of the pipeline: normalized, masked, split, stemmed,
/// stopword-filtered unigrams.
fn unigram_tokens(text: &str) -> Vec<String> {
    let normalized = normalize::normalize(text);
    let masked = normalize::mask_and_split_boundaries(&normalized);
    masked
        .split_whitespace()
        .map(stem::stem)
        .filter(|token| !stopwords::is_stopword(token))
        .collect()
}

/// Adjacent-pair bigrams over the unigram sequence.
fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{}{BIGRAM_SEPARATOR}{}", pair[0], pair[1]))
        .collect()
}

fn dedup_preserving_order(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
