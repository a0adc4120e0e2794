//! Autocomplete scoring for incremental input.
//!
//! Optimized for prefix matching on the code and title, with fixed scores
//! per match class so suggestions are stable while the user types. The query
//! is matched raw (uppercased), without the analysis pipeline.

use coursearch_core::{
    AutocompleteHit, Course, SearchOptions, filter, sort_and_truncate_suggestions,
};
use tracing::{debug, instrument};

/// Code equals the query exactly.
const CODE_EXACT_SCORE: f64 = 1.5;
/// Code starts with the query.
const CODE_PREFIX_SCORE: f64 = 1.0;
/// Code contains the query.
const CODE_CONTAINS_SCORE: f64 = 0.7;
/// Title (or any title word) starts with the query; considered only while no
/// code match reached [`CODE_PREFIX_SCORE`].
const TITLE_PREFIX_SCORE: f64 = 0.6;
/// Title contains the query without any word-prefix match.
const TITLE_CONTAINS_SCORE: f64 = 0.3;

/// Autocomplete over a corpus with optional pre-scoring filters.
#[must_use]
#[instrument(
    name = "coursearch::autocomplete",
    skip(courses, query),
    fields(query_len = query.len(), limit, candidate_count = courses.len())
)]
pub fn autocomplete(
    courses: &[Course],
    query: &str,
    limit: usize,
    options: Option<&SearchOptions>,
) -> Vec<AutocompleteHit> {
    let trimmed = query.trim();
    if trimmed.is_empty() || courses.is_empty() {
        return Vec::new();
    }
    let query_upper = trimmed.to_uppercase();

    let candidates = filter::candidates(courses, options);
    let mut hits: Vec<AutocompleteHit> = candidates
        .iter()
        .filter_map(|course| {
            let score = suggestion_score(course, &query_upper);
            (score > 0.0).then(|| AutocompleteHit::from_course(course, score))
        })
        .collect();

    debug!(
        target: "coursearch.autocomplete",
        result_count = hits.len(),
        "scoring complete"
    );
    sort_and_truncate_suggestions(&mut hits, limit);
    hits
}

/// Best applicable match-class score for one course.
fn suggestion_score(course: &Course, query_upper: &str) -> f64 {
    let mut score = 0.0_f64;

    let code = course.code.as_str();
    if code.starts_with(query_upper) {
        score = if code == query_upper {
            CODE_EXACT_SCORE
        } else {
            CODE_PREFIX_SCORE
        };
    } else if code.contains(query_upper) {
        score = CODE_CONTAINS_SCORE;
    }

    // Title matches only fill in below a full code prefix match.
    if score < CODE_PREFIX_SCORE && !course.title.is_empty() {
        let title_upper = course.title.trim().to_uppercase();
        if title_upper.starts_with(query_upper) {
            score = score.max(TITLE_PREFIX_SCORE);
        } else {
            let word_prefix = title_upper
                .split_whitespace()
                .any(|word| word.starts_with(query_upper));
            if word_prefix {
                score = score.max(TITLE_PREFIX_SCORE);
            } else if title_upper.contains(query_upper) {
                score = score.max(TITLE_CONTAINS_SCORE);
            }
        }
    }

    score
}
