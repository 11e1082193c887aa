//! Politeness delay applied before every remote call.
//!
//! Each navigation or API request first sleeps for a random duration drawn
//! from the configured `request_delay_ms` range. There is no burst
//! accounting across calls; the only guarantee is the per-call minimum.

use std::time::Duration;

use rand::Rng;

use crate::config::AggregatorConfig;

/// Random-jitter delay inserted before remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiter {
    min_ms: u64,
    max_ms: u64,
}

impl RateLimiter {
    /// Create a limiter sleeping between `min_ms` and `max_ms` (inclusive).
    ///
    /// An inverted range is treated as its swapped counterpart.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// Build a limiter from [`AggregatorConfig::request_delay_ms`].
    pub fn from_config(config: &AggregatorConfig) -> Self {
        let (min_ms, max_ms) = config.request_delay_ms;
        Self::new(min_ms, max_ms)
    }

    /// Draw the next delay from the configured range.
    pub fn sample_delay(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    /// Sleep for a freshly sampled delay.
    pub async fn wait(&self) {
        let delay = self.sample_delay();
        if delay.is_zero() {
            return;
        }
        tracing::trace!(delay_ms = delay.as_millis() as u64, "rate limit delay");
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_within_bounds() {
        let limiter = RateLimiter::new(1_000, 3_000);
        for _ in 0..200 {
            let delay = limiter.sample_delay();
            assert!(delay >= Duration::from_millis(1_000));
            assert!(delay <= Duration::from_millis(3_000));
        }
    }

    #[test]
    fn zero_range_never_sleeps() {
        let limiter = RateLimiter::new(0, 0);
        assert_eq!(limiter.sample_delay(), Duration::ZERO);
    }

    #[test]
    fn fixed_range_is_exact() {
        let limiter = RateLimiter::new(25, 25);
        assert_eq!(limiter.sample_delay(), Duration::from_millis(25));
    }

    #[test]
    fn inverted_range_is_swapped() {
        assert_eq!(RateLimiter::new(300, 100), RateLimiter::new(100, 300));
    }

    #[test]
    fn from_config_uses_request_delay() {
        let config = AggregatorConfig {
            request_delay_ms: (10, 20),
            ..Default::default()
        };
        assert_eq!(RateLimiter::from_config(&config), RateLimiter::new(10, 20));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_at_least_the_minimum() {
        let limiter = RateLimiter::new(1_000, 3_000);
        let start = tokio::time::Instant::now();
        limiter.wait().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1_000));
        assert!(elapsed <= Duration::from_millis(3_100));
    }
}
