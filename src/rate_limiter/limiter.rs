//! Keyed sliding-window rate limiter.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::window::RateWindow;

/// Per-endpoint sliding-window admission control.
///
/// Admits at most `max_calls` requests per key in any trailing `period`.
/// `admit` never blocks on I/O or waits for capacity: it decides immediately.
/// The prune-decide-record sequence for a key runs under a single mutex, so
/// concurrent callers on the same key cannot both take the last slot.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, RateWindow>>,
    max_calls: usize,
    period: Duration,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_calls` admissions per `period` for each key.
    pub fn new(max_calls: usize, period: Duration) -> Self {
        RateLimiter {
            windows: Mutex::new(HashMap::new()),
            max_calls,
            period,
        }
    }

    /// Admits or rejects one request for `key` at the current time.
    pub fn admit(&self, key: &str) -> bool {
        self.admit_at(key, Instant::now())
    }

    /// Admits or rejects one request for `key` as of `now`.
    pub fn admit_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.lock_windows();
        let admitted = windows
            .entry(key.to_string())
            .or_insert_with(RateWindow::new)
            .try_admit(now, self.period, self.max_calls);
        if !admitted {
            log::debug!(
                "Rate limit reached for {}: {} calls in the last {:?}",
                key,
                self.max_calls,
                self.period
            );
        }
        admitted
    }

    /// Number of admissions currently counted against `key`.
    pub fn window_len(&self, key: &str) -> usize {
        let now = Instant::now();
        let mut windows = self.lock_windows();
        match windows.get_mut(key) {
            Some(window) => {
                window.prune(now, self.period);
                window.len()
            }
            None => 0,
        }
    }

    /// Time until `key` can admit again, or zero if it has capacity now.
    pub fn retry_after(&self, key: &str) -> Duration {
        let now = Instant::now();
        let mut windows = self.lock_windows();
        let Some(window) = windows.get_mut(key) else {
            return Duration::ZERO;
        };
        window.prune(now, self.period);
        if window.len() < self.max_calls {
            return Duration::ZERO;
        }
        window
            .oldest()
            .map(|oldest| (oldest + self.period).saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    // A panic while holding the lock cannot leave a window half-updated, so a
    // poisoned mutex is still safe to use.
    fn lock_windows(&self) -> MutexGuard<'_, HashMap<String, RateWindow>> {
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
