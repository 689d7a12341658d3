pub mod clock;
pub mod fake_executor;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

pub use clock::ScriptedClock;
pub use fake_executor::FakeExecutor;

static TRACING: Once = Once::new();

/// Route nanny's `tracing` output into the test harness.
///
/// Poll ticks, cycle results and shutdown reasons show up under a failing
/// test. `NANNY_LOG` picks the filter, falling back to `debug` for the crate.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = std::env::var(nanny::logging::LOG_ENV)
            .ok()
            .and_then(|spec| EnvFilter::try_new(spec).ok())
            .unwrap_or_else(|| EnvFilter::new("nanny=debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .init();
    });
}

/// Bound a test future so a loop that never shuts down fails instead of
/// hanging the suite.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    const LIMIT: std::time::Duration = std::time::Duration::from_secs(5);
    match tokio::time::timeout(LIMIT, f).await {
        Ok(value) => value,
        Err(_) => panic!("no result within {LIMIT:?}; orchestrator or poller stuck?"),
    }
}
