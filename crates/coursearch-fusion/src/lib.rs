//! Hybrid dispatch and score fusion for the coursearch ranking engine.
//!
//! BM25F excels at multi-word French queries; the fuzzy scorer tolerates
//! typos in short ones. This crate combines them:
//!
//! - [`normalize`] — min-max normalization of unbounded BM25 scores, with
//!   degenerate-range and small-range handling
//! - [`fuse`] — weighted merge (60% BM25, 40% fuzzy by default), score cap,
//!   and the rank micro-adjustment guaranteeing strictly unique scores
//! - [`route`] — implicit per-query strategy selection for callers that do
//!   not name an algorithm

pub mod fuse;
pub mod normalize;
pub mod route;

pub use fuse::{FusionConfig, fuse, rank_hybrid, search_hybrid};
pub use normalize::normalize_bm25_scores;
pub use route::{Strategy, rank_routed, search};
