//! Optional tracing subscriber setup and span/field naming conventions.
//!
//! Consumers who already run their own `tracing` subscriber need nothing from
//! here; every coursearch crate emits spans and events under the
//! [`TARGET_PREFIX`] regardless. [`init_tracing`] is a convenience for hosts
//! that want structured logs without configuring `tracing-subscriber`
//! themselves.
//!
//! ```text
//! RUST_LOG=coursearch=debug
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Target prefix used by all coursearch tracing spans and events.
pub const TARGET_PREFIX: &str = "coursearch";

/// Standard tracing span names used across the pipeline.
///
/// Constant names keep subscribers, dashboards, and tests in sync.
pub mod span_names {
    /// Root span for a BM25F search.
    pub const BM25F: &str = "coursearch::bm25f";
    /// Root span for a fuzzy search.
    pub const FUZZY: &str = "coursearch::fuzzy";
    /// Root span for a hybrid search.
    pub const HYBRID: &str = "coursearch::hybrid";
    /// Root span for an autocomplete request.
    pub const AUTOCOMPLETE: &str = "coursearch::autocomplete";
    /// Score fusion step inside hybrid search.
    pub const FUSE: &str = "coursearch::fuse";
    /// Implicit routing decision for the default-algorithm path.
    pub const ROUTE: &str = "coursearch::route";
}

/// Standard structured field names used in tracing events.
pub mod field_names {
    pub const QUERY_LEN: &str = "query_len";
    pub const QUERY_SHAPE: &str = "query_shape";
    pub const LIMIT: &str = "limit";
    pub const CANDIDATE_COUNT: &str = "candidate_count";
    pub const RESULT_COUNT: &str = "result_count";
    pub const BM25_COUNT: &str = "bm25_count";
    pub const FUZZY_COUNT: &str = "fuzzy_count";
    pub const FUSED_COUNT: &str = "fused_count";
    pub const MAX_DISTANCE: &str = "max_distance";
    pub const STRATEGY: &str = "strategy";
}

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Returns the log level for the current environment.
///
/// Checks `COURSEARCH_LOG_LEVEL` first, then falls back to the default.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var("COURSEARCH_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}

/// Installs a formatted global subscriber filtered to the given level.
///
/// `RUST_LOG` takes precedence when set. Safe to call more than once; later
/// calls are no-ops when a global subscriber is already installed.
pub fn init_tracing(default_level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{TARGET_PREFIX}={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
