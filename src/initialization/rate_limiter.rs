//! Inbound rate limiter initialization.

use std::sync::Arc;

use crate::config::Config;
use crate::rate_limiter::RateLimiter;

/// Builds the shared sliding-window limiter from the configured budget.
pub fn init_rate_limiter(config: &Config) -> Arc<RateLimiter> {
    log::debug!(
        "Rate limit: {} calls per {}s per endpoint",
        config.rate_limit_max_calls,
        config.rate_limit_period_seconds
    );
    Arc::new(RateLimiter::new(
        config.rate_limit_max_calls,
        config.rate_limit_period(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_init_rate_limiter_uses_config() {
        let config = Config {
            rate_limit_max_calls: 3,
            rate_limit_period_seconds: 5,
            ..Config::default()
        };
        let limiter = init_rate_limiter(&config);
        assert_eq!(limiter.max_calls(), 3);
        assert_eq!(limiter.period(), Duration::from_secs(5));
    }
}
