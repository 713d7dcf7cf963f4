//! Sliding window of admission timestamps.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Admission timestamps for one endpoint, oldest first.
///
/// Not synchronized on its own; `RateLimiter` owns every window behind one lock.
#[derive(Debug, Default)]
pub(crate) struct RateWindow {
    admissions: VecDeque<Instant>,
}

impl RateWindow {
    pub(crate) fn new() -> Self {
        RateWindow {
            admissions: VecDeque::new(),
        }
    }

    /// Drops every admission at or before `now - period`.
    pub(crate) fn prune(&mut self, now: Instant, period: Duration) {
        while let Some(front) = self.admissions.front() {
            if now.saturating_duration_since(*front) >= period {
                self.admissions.pop_front();
            } else {
                break;
            }
        }
    }

    /// Prunes, then records `now` if fewer than `max_calls` admissions remain.
    pub(crate) fn try_admit(&mut self, now: Instant, period: Duration, max_calls: usize) -> bool {
        self.prune(now, period);
        if self.admissions.len() < max_calls {
            self.admissions.push_back(now);
            true
        } else {
            false
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.admissions.len()
    }

    pub(crate) fn oldest(&self) -> Option<Instant> {
        self.admissions.front().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_admits_up_to_limit() {
        let mut window = RateWindow::new();
        let now = Instant::now();
        let period = Duration::from_secs(60);

        for _ in 0..3 {
            assert!(window.try_admit(now, period, 3));
        }
        assert!(!window.try_admit(now, period, 3));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_rejection_does_not_record() {
        let mut window = RateWindow::new();
        let start = Instant::now();
        let period = Duration::from_secs(10);

        assert!(window.try_admit(start, period, 1));
        assert!(!window.try_admit(start + Duration::from_secs(5), period, 1));
        assert_eq!(window.len(), 1);
        // Only the first admission counts, so capacity frees at start + 10s
        assert!(window.try_admit(start + Duration::from_secs(10), period, 1));
    }

    #[test]
    fn test_prune_drops_expired_only() {
        let mut window = RateWindow::new();
        let start = Instant::now();
        let period = Duration::from_secs(10);

        assert!(window.try_admit(start, period, 10));
        assert!(window.try_admit(start + Duration::from_secs(4), period, 10));
        assert!(window.try_admit(start + Duration::from_secs(8), period, 10));

        window.prune(start + Duration::from_secs(12), period);
        assert_eq!(window.len(), 2);
        assert_eq!(window.oldest(), Some(start + Duration::from_secs(4)));

        window.prune(start + Duration::from_secs(30), period);
        assert_eq!(window.len(), 0);
        assert_eq!(window.oldest(), None);
    }
}
