//! Edit-distance fuzzy scoring.
//!
//! Tolerates typos and partial input for short queries ("MAAT380" must still
//! find `MAT380`, "algèbr" must find "algèbre"). The query is uppercased and
//! compared raw (no stemming, no stopwords, no bigrams) against the code,
//! the title words, and (as a last resort) the description words.

use coursearch_core::{Course, SearchHit, SearchOptions, filter, sort_and_truncate};
use tracing::{debug, instrument};

use crate::levenshtein::levenshtein;

// ─── Similarity primitive constants ─────────────────────────────────────────

/// Exact match.
const EXACT_SCORE: f64 = 1.0;
/// Equal ignoring case.
const CASE_INSENSITIVE_SCORE: f64 = 0.98;
/// Target starts with the query.
const PREFIX_SCORE: f64 = 0.95;
/// Query starts with the target (partial input), query longer than 2.
const REVERSE_PREFIX_SCORE: f64 = 0.90;
/// Target contains the query.
const CONTAINS_SCORE: f64 = 0.85;
/// Query contains the target, query strictly longer.
const REVERSE_CONTAINS_SCORE: f64 = 0.80;

/// Multiplier for close matches against longer targets (typo correction).
const TYPO_BOOST: f64 = 1.1;
/// Edit distance at or below which the typo boost applies.
const TYPO_BOOST_MAX_DISTANCE: usize = 2;
/// Penalty for targets much longer than the query.
const OVERLENGTH_PENALTY: f64 = 0.9;
/// Target/query length ratio beyond which the penalty applies.
const OVERLENGTH_RATIO: f64 = 1.5;

// ─── Field scan constants ───────────────────────────────────────────────────

/// Weight for matches found by scanning code prefixes.
const CODE_PREFIX_SCAN_WEIGHT: f64 = 0.9;
/// Weight for title word matches.
const TITLE_WORD_WEIGHT: f64 = 0.9;
/// Title word scores must beat `max(floor, factor · best)` to be retained.
const TITLE_RETENTION_FLOOR: f64 = 0.1;
const TITLE_RETENTION_FACTOR: f64 = 0.7;
/// Title substring fallback score, applied while best is below the ceiling.
const TITLE_SUBSTRING_SCORE: f64 = 0.6;
const TITLE_SUBSTRING_CEILING: f64 = 0.7;
/// Weight for description word matches, scanned only below the ceiling.
const DESC_WORD_WEIGHT: f64 = 0.7;
const DESC_SCAN_CEILING: f64 = 0.5;

/// Minimum word lengths considered per field.
const MIN_TITLE_WORD_LEN: usize = 2;
const MIN_DESC_WORD_LEN: usize = 3;

// ─── Adaptive edit budget ───────────────────────────────────────────────────

/// Edit budget when the caller supplies none: tight for short queries,
/// loosening with length.
#[must_use]
pub fn adaptive_max_distance(query_len: usize) -> usize {
    match query_len {
        0..=3 => 1,
        4..=6 => 2,
        _ => 3,
    }
}

// ─── Entry points ───────────────────────────────────────────────────────────

/// Fuzzy search over a corpus with optional pre-scoring filters.
#[must_use]
pub fn search_fuzzy(
    courses: &[Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
    options: Option<&SearchOptions>,
) -> Vec<SearchHit> {
    let candidates = filter::candidates(courses, options);
    rank_fuzzy(&candidates, query, limit, max_distance)
}

/// Fuzzy search over a pre-filtered candidate set.
#[must_use]
#[instrument(
    name = "coursearch::fuzzy",
    skip(candidates, query),
    fields(query_len = query.len(), limit, candidate_count = candidates.len())
)]
pub fn rank_fuzzy(
    candidates: &[&Course],
    query: &str,
    limit: usize,
    max_distance: Option<usize>,
) -> Vec<SearchHit> {
    let trimmed = query.trim();
    if trimmed.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let query_upper = trimmed.to_uppercase();
    let query_len = query_upper.chars().count();
    let budget = max_distance.unwrap_or_else(|| adaptive_max_distance(query_len));

    let mut hits: Vec<SearchHit> = candidates
        .iter()
        .filter_map(|course| {
            let score = best_course_score(course, &query_upper, budget);
            (score > 0.0 && score.is_finite())
                .then(|| SearchHit::from_course(course, score))
        })
        .collect();

    debug!(
        target: "coursearch.fuzzy",
        result_count = hits.len(),
        max_distance = budget,
        "scoring complete"
    );
    sort_and_truncate(&mut hits, limit);
    hits
}

// ─── Per-course scan ────────────────────────────────────────────────────────

/// Best similarity across the three fields, with per-field weights.
fn best_course_score(course: &Course, query_upper: &str, budget: usize) -> f64 {
    let query_len = query_upper.chars().count();
    let mut best = 0.0_f64;

    // Code field, weight 1.0. When the raw comparison misses, scan prefixes
    // of the code whose length is within the edit budget of the query length
    // ("MAAT" reaches MAT380 via its prefix "MAT").
    let code = course.code.as_str();
    let mut code_score = similarity(query_upper, code, budget);
    if code_score <= 0.0 && !code.is_empty() {
        let code_chars: Vec<char> = code.chars().collect();
        let min_len = query_len.saturating_sub(budget).max(1);
        let max_len = (query_len + budget).min(code_chars.len());
        for len in min_len..=max_len {
            let prefix: String = code_chars[..len].iter().collect();
            let prefix_score = similarity(query_upper, &prefix, budget);
            if prefix_score > 0.0 {
                code_score = code_score.max(prefix_score * CODE_PREFIX_SCAN_WEIGHT);
                break;
            }
        }
    }
    best = best.max(code_score);

    // Title words, weight 0.9, with a substring fallback for partial words.
    if !course.title.is_empty() {
        let title_upper = course.title.trim().to_uppercase();
        for word in title_upper
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_TITLE_WORD_LEN)
        {
            let word_score = similarity(query_upper, word, budget);
            if word_score > TITLE_RETENTION_FLOOR.max(best * TITLE_RETENTION_FACTOR) {
                best = best.max(word_score * TITLE_WORD_WEIGHT);
            }
        }
        if best < TITLE_SUBSTRING_CEILING
            && title_upper.chars().count() >= query_len
            && title_upper.contains(query_upper)
        {
            best = best.max(TITLE_SUBSTRING_SCORE);
        }
    }

    // Description words, weight 0.7, only when the better fields came up dry.
    if best < DESC_SCAN_CEILING && !course.description.is_empty() {
        let desc_upper = course.description.trim().to_uppercase();
        let desc_best = desc_upper
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_DESC_WORD_LEN)
            .map(|word| similarity(query_upper, word, budget))
            .fold(0.0_f64, f64::max);
        best = best.max(desc_best * DESC_WORD_WEIGHT);
    }

    best
}

// ─── Similarity primitive ───────────────────────────────────────────────────

/// Similarity in `[0, 1]` between a query and a target string.
///
/// Lexical relations (equality, prefix, containment) short-circuit with
/// fixed scores; otherwise the score derives from the Levenshtein distance,
/// zero once the distance exceeds `max_distance`.
#[must_use]
pub fn similarity(query: &str, target: &str, max_distance: usize) -> f64 {
    if query.is_empty() || target.is_empty() {
        return 0.0;
    }
    if query == target {
        return EXACT_SCORE;
    }
    if query.to_lowercase() == target.to_lowercase() {
        return CASE_INSENSITIVE_SCORE;
    }
    if target.starts_with(query) {
        return PREFIX_SCORE;
    }

    let query_len = query.chars().count();
    let target_len = target.chars().count();

    if query_len > 2 && query.starts_with(target) {
        return REVERSE_PREFIX_SCORE;
    }
    if target.contains(query) {
        return CONTAINS_SCORE;
    }
    if query_len > target_len && query.contains(target) {
        return REVERSE_CONTAINS_SCORE;
    }

    let distance = levenshtein(query, target);
    if distance > max_distance {
        return 0.0;
    }

    let max_len = query_len.max(target_len);
    if max_len == 0 {
        return EXACT_SCORE;
    }
    #[allow(clippy::cast_precision_loss)]
    let mut sim = 1.0 - distance as f64 / max_len as f64;

    if query_len >= 3 && target_len > query_len && distance <= TYPO_BOOST_MAX_DISTANCE {
        sim = (sim * TYPO_BOOST).min(1.0);
    }
    #[allow(clippy::cast_precision_loss)]
    if target_len as f64 > query_len as f64 * OVERLENGTH_RATIO {
        sim *= OVERLENGTH_PENALTY;
    }

    sim.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_corpus() -> Vec<Course> {
        vec![
            Course::new(
                "MAT380",
                "MAT380 - Algèbre linéaire",
                "Introduction à l'algèbre linéaire et ses applications",
                Some(3),
            ),
            Course::new(
                "LOG100",
                "LOG100 - Introduction à la programmation",
                "Bases de la programmation orientée objet",
                Some(3),
            ),
            Course::new(
                "INF123",
                "INF123 - Structures de données",
                "Structures de données et algorithmes fondamentaux",
                Some(4),
            ),
            Course::new(
                "MEC636",
                "MEC636 - Mécanique des fluides",
                "Mécanique des fluides et transfert thermique",
                Some(3),
            ),
        ]
    }

    // ── Similarity primitive ────────────────────────────────────────────

    #[test]
    fn exact_and_prefix_relations_short_circuit() {
        assert!((similarity("MAT380", "MAT380", 2) - 1.0).abs() < 1e-12);
        assert!((similarity("MAT3", "MAT380", 2) - 0.95).abs() < 1e-12);
        assert!((similarity("AT38", "MAT380", 2) - 0.85).abs() < 1e-12);
    }

    #[test]
    fn prefix_beats_contains() {
        // "MAT3" is a prefix; "AT38" is merely contained.
        assert!(similarity("MAT3", "MAT380", 2) > similarity("AT38", "MAT380", 2));
    }

    #[test]
    fn reverse_relations_need_a_longer_query() {
        assert!((similarity("MATH", "MAT", 2) - 0.90).abs() < 1e-12);
        assert!((similarity("XMAT", "MA", 2) - 0.80).abs() < 1e-12);
        // Short queries never reverse-prefix.
        assert!((similarity("MA", "M", 2) - 0.80).abs() < 1e-12);
    }

    #[test]
    fn distance_beyond_budget_scores_zero() {
        assert!(similarity("ABC", "XYZ", 2) == 0.0);
        assert!(similarity("ALGEBRE", "CALCUL", 3) == 0.0);
    }

    #[test]
    fn near_misses_score_between_zero_and_one() {
        let score = similarity("ALGEBRE", "ALGEBRA", 2);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn empty_strings_score_zero() {
        assert!(similarity("", "MAT", 2) == 0.0);
        assert!(similarity("MAT", "", 2) == 0.0);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        for (q, t) in [
            ("MAAT", "MAT"),
            ("ALGEBR", "ALGEBRE"),
            ("PROGRAMATION", "PROGRAMMATION"),
            ("AB", "ABCD"),
        ] {
            let score = similarity(q, t, 3);
            assert!((0.0..=1.0).contains(&score), "{q} vs {t} → {score}");
        }
    }

    // ── Adaptive budget ─────────────────────────────────────────────────

    #[test]
    fn budget_grows_with_query_length() {
        assert_eq!(adaptive_max_distance(2), 1);
        assert_eq!(adaptive_max_distance(3), 1);
        assert_eq!(adaptive_max_distance(4), 2);
        assert_eq!(adaptive_max_distance(6), 2);
        assert_eq!(adaptive_max_distance(7), 3);
        assert_eq!(adaptive_max_distance(20), 3);
    }

    // ── End-to-end ──────────────────────────────────────────────────────

    #[test]
    fn typo_in_code_still_finds_the_course() {
        let corpus = test_corpus();
        let hits = search_fuzzy(&corpus, "MAAT380", 10, Some(2), None);
        assert!(!hits.is_empty());
        assert_eq!(hits[0].code, "MAT380");
    }

    #[test]
    fn partial_code_reaches_via_prefix_scan() {
        let corpus = test_corpus();
        let hits = search_fuzzy(&corpus, "MAAT", 10, None, None);
        assert!(hits.iter().any(|h| h.code == "MAT380"));
    }

    #[test]
    fn misspelled_title_word_matches() {
        let corpus = test_corpus();
        let hits = search_fuzzy(&corpus, "algèbr", 10, None, None);
        assert!(!hits.is_empty());
        assert_eq!(hits[0].code, "MAT380");
    }

    #[test]
    fn description_is_a_last_resort() {
        let corpus = test_corpus();
        // "thermique" appears only in MEC636's description.
        let hits = search_fuzzy(&corpus, "thermique", 10, None, None);
        assert!(hits.iter().any(|h| h.code == "MEC636"));
        let hit = hits.iter().find(|h| h.code == "MEC636").unwrap();
        // Description matches carry the 0.7 field weight.
        assert!(hit.score <= DESC_WORD_WEIGHT + 1e-12);
    }

    #[test]
    fn empty_inputs_yield_empty() {
        let corpus = test_corpus();
        assert!(search_fuzzy(&corpus, "", 10, None, None).is_empty());
        assert!(search_fuzzy(&corpus, "  ", 10, None, None).is_empty());
        assert!(search_fuzzy(&[], "MAT", 10, None, None).is_empty());
    }

    #[test]
    fn unrelated_query_yields_empty() {
        let corpus = test_corpus();
        assert!(search_fuzzy(&corpus, "ZZZZZZZZZ", 10, Some(1), None).is_empty());
    }

    #[test]
    fn limit_and_ordering_hold() {
        let corpus = test_corpus();
        let hits = search_fuzzy(&corpus, "MAT", 2, None, None);
        assert!(hits.len() <= 2);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn caller_budget_overrides_the_adaptive_one() {
        let corpus = test_corpus();
        // Distance 2 from "MAT380" with budget 0: lexical relations only.
        let strict = search_fuzzy(&corpus, "MXT380", 10, Some(0), None);
        assert!(strict.is_empty());
        let loose = search_fuzzy(&corpus, "MXT380", 10, Some(2), None);
        assert!(loose.iter().any(|h| h.code == "MAT380"));
    }

    #[test]
    fn options_filter_before_scoring() {
        let corpus = test_corpus();
        let options = SearchOptions::default()
            .with_programmes(vec![coursearch_core::Programme::INF]);
        let hits = search_fuzzy(&corpus, "structures", 10, None, Some(&options));
        assert!(hits.iter().all(|h| h.code.starts_with("INF")));
    }
}
