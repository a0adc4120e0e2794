//! Field-weighted BM25 (BM25F) scoring.
//!
//! Each course field gets its own BM25 contribution with a per-field weight
//! and length-normalization parameter; the code field dominates, the
//! description provides recall. On top of the probabilistic score sit
//! lexical-similarity boosts that guarantee intuitive behavior for
//! code-shaped queries (`"MAT380"` must rank `MAT380` first) and single-word
//! substring matches.
//!
//! The corpus is small enough for a per-query linear scan; there is no
//! inverted index and no caching.

use std::collections::HashMap;

use coursearch_analyze::{
    CorpusStats, DocumentIndex, FieldIndex, analyze_query, index_candidates, is_bigram,
};
use coursearch_core::{
    Course, SearchHit, SearchOptions, filter, is_code_shaped, sort_and_truncate,
};
use tracing::{debug, instrument};

// ─── Tuning constants ───────────────────────────────────────────────────────

/// BM25 term-frequency saturation.
const K1: f64 = 1.2;

/// Field weight for the course code.
const CODE_WEIGHT: f64 = 3.0;
/// Field weight for the title.
const TITLE_WEIGHT: f64 = 1.8;
/// Field weight for the description.
const DESC_WEIGHT: f64 = 0.8;

/// Length-normalization strength per field. The code field is short and
/// barely normalized; descriptions get the standard 0.75.
const CODE_B: f64 = 0.3;
const TITLE_B: f64 = 0.5;
const DESC_B: f64 = 0.75;

/// Code-shaped queries double the code field weight.
const CODE_QUERY_WEIGHT_FACTOR: f64 = 2.0;

/// IDF multiplier for bigram terms (phrase proximity reward).
const BIGRAM_IDF_BOOST: f64 = 1.5;

/// Damping applied to the rare-term IDF floor for terms absent from every
/// document; keeps substring boosts alive for such queries.
const UNMATCHED_IDF_DAMPING: f64 = 0.1;

/// Additive boost when the code equals the query exactly.
const EXACT_CODE_BOOST: f64 = 5.0;
/// Additive boost when the code starts with a code-shaped query.
const CODE_PREFIX_BOOST: f64 = 2.0;
/// Additive boost when the code contains the query (length ≥ 3).
const CODE_SUBSTRING_BOOST: f64 = 1.5;
/// Additive boost when the title contains a single-word query.
const TITLE_SUBSTRING_BOOST: f64 = 0.8;
/// Additive boost when the description contains a single-word query.
const DESC_SUBSTRING_BOOST: f64 = 0.5;

/// Substring boosts require at least this many characters.
const MIN_SUBSTRING_LEN: usize = 3;

/// Scores at or below this are treated as no-match and dropped.
const SCORE_EPSILON: f64 = 1e-10;

// ─── Entry points ───────────────────────────────────────────────────────────

/// BM25F search over a corpus with optional pre-scoring filters.
#[must_use]
pub fn search_bm25(
    courses: &[Course],
    query: &str,
    limit: usize,
    options: Option<&SearchOptions>,
) -> Vec<SearchHit> {
    let candidates = filter::candidates(courses, options);
    rank_bm25(&candidates, query, limit)
}

/// BM25F search over a pre-filtered candidate set.
#[must_use]
#[instrument(
    name = "coursearch::bm25f",
    skip(candidates, query),
    fields(query_len = query.len(), limit, candidate_count = candidates.len())
)]
pub fn rank_bm25(candidates: &[&Course], query: &str, limit: usize) -> Vec<SearchHit> {
    let trimmed = query.trim();
    if trimmed.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let terms = analyze_query(trimmed);
    if terms.is_empty() {
        return Vec::new();
    }

    let documents = index_candidates(candidates);
    let stats = CorpusStats::compute(&documents);
    let idf = idf_map(&terms, &documents);

    let code_shaped = is_code_shaped(trimmed);
    let query_upper = trimmed.to_uppercase();
    let substring_query =
        (terms.len() == 1 && !code_shaped).then(|| trimmed.to_lowercase());

    let mut hits: Vec<SearchHit> = documents
        .iter()
        .filter_map(|doc| {
            score_document(
                doc,
                &terms,
                &idf,
                stats,
                code_shaped,
                &query_upper,
                substring_query.as_deref(),
            )
            .map(|score| SearchHit::from_course(doc.course, score))
        })
        .collect();

    debug!(
        target: "coursearch.bm25f",
        result_count = hits.len(),
        code_shaped,
        "scoring complete"
    );
    sort_and_truncate(&mut hits, limit);
    hits
}

// ─── Scoring internals ──────────────────────────────────────────────────────

/// IDF per query term, counting documents containing the term in any field.
///
/// `ln(1 + (N − n + 0.5) / (n + 0.5))`, never negative on small corpora.
/// Terms absent everywhere get a damped floor instead of zero so the
/// substring boosts below still apply. Bigram terms are boosted.
fn idf_map(terms: &[String], documents: &[DocumentIndex<'_>]) -> HashMap<String, f64> {
    #[allow(clippy::cast_precision_loss)]
    let total = documents.len() as f64;
    terms
        .iter()
        .map(|term| {
            #[allow(clippy::cast_precision_loss)]
            let with_term = documents.iter().filter(|doc| doc.contains(term)).count() as f64;
            let idf = if with_term > 0.0 {
                let mut idf = (1.0 + (total - with_term + 0.5) / (with_term + 0.5)).ln();
                if is_bigram(term) {
                    idf *= BIGRAM_IDF_BOOST;
                }
                idf
            } else {
                (1.0 + total / 0.5).ln() * UNMATCHED_IDF_DAMPING
            };
            (term.clone(), idf)
        })
        .collect()
}

/// BM25F score for one document, `None` when the document does not qualify
/// (no signal, or a non-finite intermediate).
fn score_document(
    doc: &DocumentIndex<'_>,
    terms: &[String],
    idf: &HashMap<String, f64>,
    stats: CorpusStats,
    code_shaped: bool,
    query_upper: &str,
    substring_query: Option<&str>,
) -> Option<f64> {
    let code_weight = if code_shaped {
        CODE_WEIGHT * CODE_QUERY_WEIGHT_FACTOR
    } else {
        CODE_WEIGHT
    };

    let mut score = 0.0;
    for term in terms {
        let idf = idf.get(term).copied().unwrap_or(0.0);
        if idf <= 0.0 {
            continue;
        }
        let field_score = code_weight * field_contribution(&doc.code, term, CODE_B, stats.avg_code_len)
            + TITLE_WEIGHT * field_contribution(&doc.title, term, TITLE_B, stats.avg_title_len)
            + DESC_WEIGHT * field_contribution(&doc.description, term, DESC_B, stats.avg_desc_len);
        score += idf * field_score;
    }

    score += lexical_boosts(doc.course, code_shaped, query_upper, substring_query);

    (score.is_finite() && score > SCORE_EPSILON).then_some(score)
}

/// Per-field BM25 contribution with field-specific length normalization.
fn field_contribution(field: &FieldIndex, term: &str, b: f64, avg_len: f64) -> f64 {
    let tf = f64::from(field.frequency(term));
    if tf <= 0.0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let field_len = field.len() as f64;
    let norm = 1.0 - b + b * (field_len / avg_len.max(1.0));
    tf * (K1 + 1.0) / (tf + K1 * norm)
}

/// Additive exact/prefix/substring boosts on top of the probabilistic score.
fn lexical_boosts(
    course: &Course,
    code_shaped: bool,
    query_upper: &str,
    substring_query: Option<&str>,
) -> f64 {
    let mut boost = 0.0;
    let code = course.code.as_str();

    if code == query_upper {
        boost += EXACT_CODE_BOOST;
    } else if code_shaped && code.starts_with(query_upper) {
        boost += CODE_PREFIX_BOOST;
    } else if query_upper.chars().count() >= MIN_SUBSTRING_LEN && code.contains(query_upper) {
        boost += CODE_SUBSTRING_BOOST;
    }

    if let Some(query_lower) = substring_query
        && query_lower.chars().count() >= MIN_SUBSTRING_LEN
    {
        if course.title.to_lowercase().contains(query_lower) {
            boost += TITLE_SUBSTRING_BOOST;
        }
        if course.description.to_lowercase().contains(query_lower) {
            boost += DESC_SUBSTRING_BOOST;
        }
    }

    boost
}
