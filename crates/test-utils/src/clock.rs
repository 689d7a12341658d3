use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use nanny::watch::Clock;

type Hook = Box<dyn FnOnce() + Send>;

/// A clock whose sleeps return immediately.
///
/// Every awaited `sleep` is one tick (1-based). Hooks registered with
/// [`ScriptedClock::at`] run during their tick, before the caller rescans, so
/// a test can change the mock filesystem or cancel shutdown at a precise
/// point in the poll loop.
#[derive(Default)]
pub struct ScriptedClock {
    ticks: AtomicU64,
    hooks: Mutex<BTreeMap<u64, Vec<Hook>>>,
}

impl fmt::Debug for ScriptedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedClock")
            .field("ticks", &self.ticks())
            .finish_non_exhaustive()
    }
}

impl ScriptedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` during the `tick`-th sleep.
    pub fn at(&self, tick: u64, hook: impl FnOnce() + Send + 'static) -> &Self {
        self.hooks
            .lock()
            .unwrap()
            .entry(tick)
            .or_default()
            .push(Box::new(hook));
        self
    }

    /// Number of sleeps so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Clock for ScriptedClock {
    fn sleep(&self, _period: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        // A tick only counts once the sleep is actually awaited.
        Box::pin(async move {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
            let hooks = self.hooks.lock().unwrap().remove(&tick).unwrap_or_default();
            for hook in hooks {
                hook();
            }
            tokio::task::yield_now().await;
        })
    }
}
