//! Single-shot timer used between retry attempts.

use async_trait::async_trait;
use std::time::Duration;

/// Waits once for the given delay. Injected so tests can observe backoff
/// delays without sleeping.
#[async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Timer backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn tokio_timer_waits_at_least_the_delay() {
        let start = Instant::now();
        TokioTimer.sleep(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
