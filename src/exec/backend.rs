// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The orchestrator talks to an `ExecutorBackend` instead of spawning
//! processes itself. This makes it easy to swap in a fake executor in tests
//! while keeping the production implementation in [`runner`](super::runner).

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::engine::CycleResult;
use crate::types::{CommandSpec, FailurePolicy};

use super::runner::{run_line, run_script};

/// Trait abstracting how one cycle's commands are executed.
///
/// Implementations must run the whole spec to completion before returning;
/// the orchestrator never calls `run` again while a previous call is pending.
pub trait ExecutorBackend: Send {
    fn run<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
        shutdown: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CycleResult> + Send + 'a>>;
}

/// Executor backend used in production.
///
/// The interpreter is resolved once at startup and handed in here; nothing
/// reads the environment later.
#[derive(Debug, Clone)]
pub struct RealExecutorBackend {
    interpreter: PathBuf,
    failure_policy: FailurePolicy,
}

impl RealExecutorBackend {
    pub fn new(interpreter: impl Into<PathBuf>, failure_policy: FailurePolicy) -> Self {
        Self {
            interpreter: interpreter.into(),
            failure_policy,
        }
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn run<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
        shutdown: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CycleResult> + Send + 'a>> {
        Box::pin(async move {
            let mut result = CycleResult::default();

            match spec {
                CommandSpec::Script(script) => {
                    result.push(run_script(&self.interpreter, script, shutdown).await);
                }
                CommandSpec::Split(lines) => {
                    for line in lines {
                        if shutdown.is_cancelled() {
                            break;
                        }
                        let record = run_line(line, shutdown).await;
                        let failed = !record.outcome.is_success();
                        result.push(record);

                        if failed && self.failure_policy == FailurePolicy::Abort {
                            let skipped = lines.len() - result.records().len();
                            warn!(
                                command = %line,
                                skipped,
                                "command failed; skipping rest of cycle"
                            );
                            break;
                        }
                    }
                }
            }

            info!(
                commands = result.records().len(),
                failures = result.failures(),
                "cycle finished"
            );
            result
        })
    }
}
