// src/watch/clock.rs

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Source of the delay between two scans.
///
/// Production code uses [`TokioClock`]; tests can provide a clock that
/// returns immediately and counts ticks.
pub trait Clock: Send + Sync + Debug {
    fn sleep(&self, period: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real clock backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, period: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(period))
    }
}
