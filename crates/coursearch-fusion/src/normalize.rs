//! BM25 score normalization ahead of weighted fusion.
//!
//! BM25F scores are unbounded while fuzzy scores live in `[0, 1]`, so the
//! BM25 side is min-max normalized before blending. Two edge cases get
//! special treatment:
//!
//! - **Degenerate range** (all scores effectively identical): rank order is
//!   preserved by re-sorting deterministically and assigning synthetic
//!   scores linearly from 1.0 down to 0.9.
//! - **Small nonzero range** (under 10% of the maximum): plain min-max would
//!   crowd everything near the extremes, so a logarithmic re-spread regains
//!   differentiation.
//!
//! Non-finite input scores are treated as 0.0.

use coursearch_core::SearchHit;

const NUMERIC_EPSILON: f64 = 1e-10;
/// Range below `max_score` times this is considered degenerate.
const DEGENERATE_RANGE_FACTOR: f64 = 1e-6;
/// Synthetic scores for a degenerate set span `[TOP - SPREAD, TOP]`.
const DEGENERATE_TOP: f64 = 1.0;
const DEGENERATE_SPREAD: f64 = 0.1;
/// Ranges under this fraction of the maximum get the log re-spread.
const SMALL_RANGE_FRACTION: f64 = 0.1;
/// Log re-spread base: `max(FLOOR, 1 + SCALE · range/max)`.
const LOG_BASE_FLOOR: f64 = 1.01;
const LOG_BASE_SCALE: f64 = 10.0;

/// Normalizes hit scores into `[0, 1]` in place.
///
/// May reorder the slice: the degenerate path sorts by (original score
/// descending, code ascending) before assigning synthetic scores.
pub fn normalize_bm25_scores(hits: &mut [SearchHit]) {
    if hits.is_empty() {
        return;
    }

    let min = hits
        .iter()
        .map(|hit| sanitize(hit.score))
        .fold(f64::INFINITY, f64::min);
    let max = hits
        .iter()
        .map(|hit| sanitize(hit.score))
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let degenerate_threshold = (max * DEGENERATE_RANGE_FACTOR).max(NUMERIC_EPSILON);
    if range < degenerate_threshold {
        assign_rank_scores(hits);
        return;
    }

    if range < max * SMALL_RANGE_FRACTION {
        let log_base = (1.0 + (range / max) * LOG_BASE_SCALE).max(LOG_BASE_FLOOR);
        for hit in hits.iter_mut() {
            let normalized = (sanitize(hit.score) - min) / range;
            let respread = (1.0 + normalized * (log_base - 1.0)).ln() / log_base.ln();
            hit.score = respread.clamp(0.0, 1.0);
        }
    } else {
        for hit in hits.iter_mut() {
            hit.score = ((sanitize(hit.score) - min) / range).clamp(0.0, 1.0);
        }
    }
}

/// Synthetic linear scores for an indistinguishable result set.
fn assign_rank_scores(hits: &mut [SearchHit]) {
    hits.sort_by(SearchHit::cmp_by_rank);
    let size = hits.len();
    for (rank, hit) in hits.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let rank_fraction = if size > 1 {
            rank as f64 / (size - 1) as f64
        } else {
            0.0
        };
        hit.score = (DEGENERATE_TOP - rank_fraction * DEGENERATE_SPREAD)
            .clamp(DEGENERATE_TOP - DEGENERATE_SPREAD, DEGENERATE_TOP);
    }
}

fn sanitize(score: f64) -> f64 {
    if score.is_finite() { score } else { 0.0 }
}
