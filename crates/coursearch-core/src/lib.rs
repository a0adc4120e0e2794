//! Core types, errors, and shared pipeline stages for the coursearch
//! ranking engine.
//!
//! This crate defines the course data model ([`Course`], [`SearchHit`],
//! [`AutocompleteHit`], [`SearchOptions`], [`Programme`]), the unified error
//! type ([`SearchError`]), query shape classification, the pre-scoring filter
//! stage, deterministic sort-and-truncate, and the corpus snapshot machinery
//! ([`CorpusSnapshot`], [`SharedCorpus`], [`CorpusProvider`]).
//!
//! It has minimal external dependencies and is depended on by every other
//! crate in the workspace.

pub mod error;
pub mod filter;
pub mod query_class;
pub mod ranking;
pub mod snapshot;
pub mod tracing_config;
pub mod types;

pub use error::{SearchError, SearchResult};
pub use query_class::{QueryShape, is_code_shaped};
pub use ranking::{sort_and_truncate, sort_and_truncate_suggestions};
pub use snapshot::{CorpusProvider, CorpusSnapshot, SharedCorpus};
pub use types::{
    Algorithm, AutocompleteHit, Course, Programme, SearchHit, SearchOptions, canonical_code,
    programme_prefix_of,
};
