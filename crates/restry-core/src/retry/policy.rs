use rand::Rng;
use std::time::Duration;

use crate::config::RestConfig;
use crate::response::ClassifiedResponse;

use super::classify::{classify_http_status, StatusClass};

/// Backoff base in milliseconds: the first retry waits up to this long.
pub const BACKOFF_BASE_MS: f64 = 100.0;
/// Backoff growth factor per collision.
pub const BACKOFF_FACTOR: f64 = 4.0;
/// Exponent cap; keeps the ceiling finite for absurd collision counts.
const MAX_EXPONENT: i64 = 32;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this response.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Randomized exponential backoff gated by a collision counter.
///
/// A transient response is eligible for retry while the counter carried by
/// the request (before it is bumped) is `<= max_retries`. With the default of
/// 3 that allows four retries after the original attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Upper bound on any single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RestConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &RestConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            max_delay: cfg.max_delay_between_retries(),
        }
    }

    /// Retry eligibility, evaluated against the counter *before* it is bumped.
    pub fn is_eligible(&self, status_code: u16, collisions_before: u32) -> bool {
        classify_http_status(status_code) == StatusClass::Transient
            && collisions_before <= self.max_retries
    }

    /// Delay for a given post-increment collision count and a sample in `[0, 1]`:
    /// `min(sample * 100ms * 4^(count - 1), max_delay)`.
    pub fn backoff_delay(&self, collision_count: u32, sample: f64) -> Duration {
        let exponent = (i64::from(collision_count) - 1).min(MAX_EXPONENT) as i32;
        let ceiling_ms = BACKOFF_BASE_MS * BACKOFF_FACTOR.powi(exponent);
        let sample = if sample.is_nan() { 0.0 } else { sample.clamp(0.0, 1.0) };
        let max_ms = self.max_delay.as_secs_f64() * 1000.0;
        let delay_ms = (sample * ceiling_ms).min(max_ms);
        Duration::from_micros((delay_ms * 1000.0).round() as u64)
    }

    /// Backoff delay with a fresh random sample.
    pub fn jittered_delay(&self, collision_count: u32) -> Duration {
        let sample: f64 = rand::thread_rng().gen();
        self.backoff_delay(collision_count, sample)
    }

    /// Decide whether to re-issue the request that produced `response`.
    pub fn decide(&self, response: &ClassifiedResponse) -> RetryDecision {
        if response.is_retryable() {
            RetryDecision::RetryAfter(self.jittered_delay(response.collision_count()))
        } else {
            RetryDecision::NoRetry
        }
    }
}
