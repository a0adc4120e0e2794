//! Immutable corpus snapshots and the shared handle that publishes them.
//!
//! The ranking engine never mutates course data. An external ingester builds
//! a [`CorpusSnapshot`] and publishes it through [`SharedCorpus`]; in-flight
//! queries keep whatever snapshot they started with, so the read path takes
//! no lock beyond the pointer exchange.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::{SearchError, SearchResult};
use crate::types::Course;

/// An immutable, ordered view of the course corpus.
///
/// Codes are unique within a snapshot: [`CorpusSnapshot::new`] deduplicates
/// (first occurrence wins), [`CorpusSnapshot::try_new`] rejects duplicates.
#[derive(Debug, Clone, Default)]
pub struct CorpusSnapshot {
    courses: Vec<Course>,
}

impl CorpusSnapshot {
    /// Builds a snapshot, dropping any course whose code was already seen.
    #[must_use]
    pub fn new(courses: Vec<Course>) -> Self {
        let mut seen = HashSet::with_capacity(courses.len());
        let mut kept = Vec::with_capacity(courses.len());
        for course in courses {
            if seen.insert(course.code.clone()) {
                kept.push(course);
            } else {
                warn!(
                    target: "coursearch.snapshot",
                    code = %course.code,
                    "dropping duplicate course code at ingest"
                );
            }
        }
        Self { courses: kept }
    }

    /// Builds a snapshot, failing on the first duplicate code.
    pub fn try_new(courses: Vec<Course>) -> SearchResult<Self> {
        let mut seen = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !seen.insert(course.code.clone()) {
                return Err(SearchError::DuplicateCode {
                    code: course.code.clone(),
                });
            }
        }
        Ok(Self { courses })
    }

    /// An empty snapshot. Every query against it yields an empty result.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The courses in ingest order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the snapshot holds no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Read access to the current corpus, as consumed by the ranking engine.
///
/// `is_ready` mirrors the ingester's session readiness flag: while `false`,
/// search endpoints return empty results rather than stale data.
pub trait CorpusProvider: Send + Sync {
    /// The current snapshot. Implementations must make this cheap; queries
    /// call it once and hold the returned `Arc` for their whole duration.
    fn snapshot(&self) -> Arc<CorpusSnapshot>;

    /// Whether the corpus has been populated at least once.
    fn is_ready(&self) -> bool;
}

/// Shared corpus handle with atomic snapshot replacement.
///
/// Writers publish a complete new snapshot; the lock guards only the pointer
/// exchange. Readers clone the `Arc` and drop the guard immediately, so a
/// publish never waits on in-flight queries.
#[derive(Debug)]
pub struct SharedCorpus {
    current: RwLock<Arc<CorpusSnapshot>>,
    ready: AtomicBool,
}

impl SharedCorpus {
    /// Creates an unready handle holding an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CorpusSnapshot::empty())),
            ready: AtomicBool::new(false),
        }
    }

    /// Publishes a new snapshot and marks the corpus ready.
    pub fn publish(&self, snapshot: CorpusSnapshot) {
        let snapshot = Arc::new(snapshot);
        match self.current.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
        self.ready.store(true, Ordering::Release);
    }
}

impl Default for SharedCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusProvider for SharedCorpus {
    fn snapshot(&self) -> Arc<CorpusSnapshot> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl<P: CorpusProvider + ?Sized> CorpusProvider for Arc<P> {
    fn snapshot(&self) -> Arc<CorpusSnapshot> {
        (**self).snapshot()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> Course {
        Course::new(code, format!("{code} - Titre"), "", Some(3))
    }

    #[test]
    fn ingest_deduplicates_keeping_first() {
        let snapshot = CorpusSnapshot::new(vec![
            Course::new("LOG100", "first", "", Some(3)),
            Course::new("LOG100", "second", "", Some(4)),
            course("MAT380"),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.courses()[0].title, "first");
    }

    #[test]
    fn strict_ingest_rejects_duplicates() {
        let result = CorpusSnapshot::try_new(vec![course("LOG100"), course("LOG100")]);
        assert!(matches!(
            result,
            Err(SearchError::DuplicateCode { code }) if code == "LOG100"
        ));
    }

    #[test]
    fn strict_ingest_accepts_unique_codes() {
        let snapshot =
            CorpusSnapshot::try_new(vec![course("LOG100"), course("MAT380")]).expect("unique");
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn fresh_handle_is_unready_and_empty() {
        let shared = SharedCorpus::new();
        assert!(!shared.is_ready());
        assert!(shared.snapshot().is_empty());
    }

    #[test]
    fn publish_flips_readiness_and_swaps_snapshot() {
        let shared = SharedCorpus::new();
        shared.publish(CorpusSnapshot::new(vec![course("LOG100")]));
        assert!(shared.is_ready());
        assert_eq!(shared.snapshot().len(), 1);
    }

    #[test]
    fn old_snapshot_survives_a_publish() {
        let shared = SharedCorpus::new();
        shared.publish(CorpusSnapshot::new(vec![course("LOG100")]));
        let held = shared.snapshot();
        shared.publish(CorpusSnapshot::new(vec![course("MAT380"), course("GPA123")]));

        // The in-flight reader still sees the snapshot it started with.
        assert_eq!(held.len(), 1);
        assert_eq!(held.courses()[0].code, "LOG100");
        assert_eq!(shared.snapshot().len(), 2);
    }

    #[test]
    fn provider_works_through_arc() {
        let shared = Arc::new(SharedCorpus::new());
        shared.publish(CorpusSnapshot::new(vec![course("LOG100")]));
        let provider: Arc<dyn CorpusProvider> = shared;
        assert!(provider.is_ready());
        assert_eq!(provider.snapshot().len(), 1);
    }
}
