use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use nanny::engine::{CommandOutcome, CommandRecord, CycleResult};
use nanny::exec::ExecutorBackend;
use nanny::types::CommandSpec;
use tokio_util::sync::CancellationToken;

type RunHook = Box<dyn FnMut() + Send>;

/// A fake executor that:
/// - records which specs were "run"
/// - immediately reports the configured outcome (success by default)
/// - optionally calls a hook on every run
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<CommandSpec>>>,
    outcome: CommandOutcome,
    on_run: Option<RunHook>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<CommandSpec>>>) -> Self {
        Self {
            executed,
            outcome: CommandOutcome::Success,
            on_run: None,
        }
    }

    /// Report every run as exiting with `code`.
    pub fn failing(mut self, code: i32) -> Self {
        self.outcome = CommandOutcome::Failed(code);
        self
    }

    pub fn on_run(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_run = Some(Box::new(hook));
        self
    }
}

impl ExecutorBackend for FakeExecutor {
    fn run<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
        _shutdown: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CycleResult> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut guard = self.executed.lock().unwrap();
                guard.push(spec.clone());
            }
            if let Some(hook) = self.on_run.as_mut() {
                hook();
            }
            std::iter::once(CommandRecord::new(spec.to_string(), self.outcome.clone())).collect()
        })
    }
}
