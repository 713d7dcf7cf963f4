//! Error handling and outcome statistics.
//!
//! This module provides:
//! - Error type definitions (setup, configuration, transport)
//! - The failure taxonomy of fetch outcomes
//! - Outcome statistics tracking
//! - Categorization of `reqwest` errors

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, describe_status};
pub use stats::ProcessingStats;
pub use types::{ConfigError, FailureKind, InitializationError, TransportError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        assert_eq!(stats.success_count(), 0);
        for kind in FailureKind::iter() {
            assert_eq!(stats.failure_count(kind), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_success();
        stats.increment_failure(FailureKind::NotFound);
        stats.increment_failure(FailureKind::NotFound);
        stats.increment_failure(FailureKind::Timeout);

        assert_eq!(stats.success_count(), 1);
        assert_eq!(stats.failure_count(FailureKind::NotFound), 2);
        assert_eq!(stats.failure_count(FailureKind::Timeout), 1);
        assert_eq!(stats.total_failures(), 3);
    }

    #[test]
    fn test_failure_breakdown_has_every_kind() {
        let stats = ProcessingStats::new();
        stats.increment_failure(FailureKind::DownloadFailed);
        let breakdown = stats.failure_breakdown();
        assert_eq!(breakdown.len(), FailureKind::iter().count());
        assert_eq!(breakdown.get("download_failed"), Some(&1));
        assert_eq!(breakdown.get("rate_limited"), Some(&0));
    }

    #[test]
    fn test_failure_labels_are_unique() {
        let labels: std::collections::HashSet<_> =
            FailureKind::iter().map(|k| k.label()).collect();
        assert_eq!(labels.len(), FailureKind::iter().count());
    }

    #[test]
    fn test_failure_kind_display_uses_user_message() {
        assert_eq!(FailureKind::NotFound.to_string(), "No matching image found");
        assert_eq!(
            FailureKind::RateLimited.to_string(),
            "Rate limit exceeded"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Timeout("operation timed out".to_string());
        assert_eq!(err.to_string(), "request timed out: operation timed out");
    }
}
