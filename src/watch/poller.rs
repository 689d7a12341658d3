// src/watch/poller.rs

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::clock::{Clock, TokioClock};
use super::detector::{ChangeDetector, Snapshot};

/// Delay between two scans of the watch target.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Repeatedly scans the watch target on a fixed interval.
#[derive(Debug, Clone)]
pub struct Poller {
    detector: ChangeDetector,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl Poller {
    pub fn new(detector: ChangeDetector, interval: Duration) -> Self {
        Self::with_clock(detector, interval, Arc::new(TokioClock))
    }

    pub fn with_clock(detector: ChangeDetector, interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            detector,
            clock,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Take one scan on the blocking pool.
    pub async fn snapshot(&self) -> Snapshot {
        let detector = self.detector.clone();
        match tokio::task::spawn_blocking(move || detector.latest_modification()).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // A panicking scan is treated like an empty tree.
                warn!(error = %err, "scan task failed");
                Snapshot::epoch()
            }
        }
    }

    /// Sleep and rescan until a scan is strictly newer than `reference`.
    ///
    /// Returns `None` as soon as `shutdown` is cancelled.
    pub async fn wait_for_change(
        &self,
        reference: &Snapshot,
        shutdown: &CancellationToken,
    ) -> Option<Snapshot> {
        loop {
            if shutdown.is_cancelled() {
                return None;
            }
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return None,
                _ = self.clock.sleep(self.interval) => {}
            }

            let current = tokio::select! {
                biased;
                _ = shutdown.cancelled() => return None,
                snapshot = self.snapshot() => snapshot,
            };

            if current.is_newer_than(reference) {
                debug!(path = ?current.path, "change detected");
                return Some(current);
            }
            trace!("no change");
        }
    }
}
