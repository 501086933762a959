//! Minimum spacing between consecutive outbound requests

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Leaky-bucket-of-one throttle
///
/// `acquire` suspends the caller until at least `min_interval` has passed
/// since the previous acquisition. The last-request timestamp is read and
/// written under one mutex guard that is held across the wait, so two
/// concurrent callers can never both observe an elapsed window and proceed
/// together.
#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Waits out the remainder of the spacing window, then claims a slot
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();

            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "throttling outbound request");
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}
