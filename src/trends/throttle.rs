// Fixed courtesy delay between trend requests.
//
// Google Trends starts answering 429 when hit in quick succession from one
// address. The analyzer waits a fixed delay before every query; a zero delay
// turns the throttle off (tests, cached sources).

use tokio::time::Duration;
use tracing::debug;

/// Default pause before each trends request.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// A fixed pause awaited before each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A throttle that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep for the configured delay.
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!(delay_ms = self.delay.as_millis() as u64, "Throttling before request");
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test]
    async fn disabled_throttle_returns_immediately() {
        let throttle = Throttle::disabled();
        let start = Instant::now();
        throttle.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn throttle_waits_every_time() {
        let throttle = Throttle::new(Duration::from_millis(100));
        let start = Instant::now();
        throttle.pause().await;
        throttle.pause().await;
        let elapsed = start.elapsed();
        // Two pauses of 100ms each, unlike a rate limiter the first one waits too
        assert!(
            elapsed >= Duration::from_millis(190),
            "Expected ~200ms delay, got {:?}",
            elapsed
        );
    }

    #[test]
    fn default_delay_is_three_seconds() {
        assert_eq!(Throttle::default().delay(), Duration::from_secs(3));
    }
}
