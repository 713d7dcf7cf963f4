//! Outcome statistics tracking.
//!
//! Thread-safe counters of served images and failures per kind, shared by the
//! HTTP handlers and reported by `/status`.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe outcome statistics tracker.
///
/// All failure kinds are initialized to zero on creation, so lookups never
/// miss. Share across tasks with `Arc`.
pub struct ProcessingStats {
    successes: AtomicUsize,
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats {
            successes: AtomicUsize::new(0),
            failures,
        }
    }

    pub fn increment_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment a failure counter.
    pub fn increment_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    pub fn success_count(&self) -> usize {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    /// Failure counts keyed by label, sorted for stable JSON output.
    pub fn failure_breakdown(&self) -> BTreeMap<&'static str, usize> {
        FailureKind::iter()
            .map(|kind| (kind.label(), self.failure_count(kind)))
            .collect()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
