//! End-of-run statistics.

use std::time::Duration;

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, ProcessingStats};

/// Logs outcome counts accumulated since startup.
pub fn log_final_statistics(stats: &ProcessingStats, uptime: Duration) {
    let served = stats.success_count();
    let failed = stats.total_failures();
    info!(
        "Served {} images, {} failed requests in {:.1}s",
        served,
        failed,
        uptime.as_secs_f64()
    );

    if failed > 0 {
        info!("Failure Counts ({} total):", failed);
        for kind in FailureKind::iter() {
            let count = stats.failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_final_statistics_empty() {
        log_final_statistics(&ProcessingStats::new(), Duration::ZERO);
    }

    #[test]
    fn test_log_final_statistics_with_failures() {
        let stats = ProcessingStats::new();
        stats.increment_success();
        stats.increment_failure(FailureKind::Timeout);
        stats.increment_failure(FailureKind::Timeout);
        log_final_statistics(&stats, Duration::from_secs(90));
        assert_eq!(stats.total_failures(), 2);
    }
}
