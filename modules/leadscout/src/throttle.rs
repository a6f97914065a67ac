//! Request pacing. A minimum interval between collaborator calls keeps
//! the run from tripping upstream rate limits; the interval is an
//! injected strategy shared by discovery and enrichment.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::warn;

/// Enforces a minimum interval between consecutive collaborator requests.
/// Not a correctness mechanism; purely to avoid bursting the upstream.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Wait until at least `min_interval` has passed since the previous
    /// call, then mark this instant as the new reference point.
    pub async fn pause(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Attempt budget for a single collaborator call before it turns fatal.
pub const CALL_ATTEMPTS: u32 = 3;

/// Retry a collaborator call with linear backoff. Single-call failures are
/// transient more often than not (upstream scraper hiccups, proxy churn),
/// so a small attempt budget runs before the error propagates as fatal.
pub async fn retry_with_backoff<T, E, F, Fut>(
    op: &str,
    base_delay: Duration,
    max_attempts: u32,
    mut call: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                warn!(op, attempt, error = %e, "Collaborator call failed, retrying");
                sleep(base_delay * attempt).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
