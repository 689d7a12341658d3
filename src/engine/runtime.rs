// src/engine/runtime.rs

use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::exec::ExecutorBackend;
use crate::types::CommandSpec;
use crate::watch::Poller;

use super::core::CoreLoop;
use super::{LoopCommand, LoopEvent};

/// Drives the watch/run loop and delegates command execution to an
/// `ExecutorBackend`.
///
/// This is a pure IO shell around `CoreLoop`, which decides what happens
/// next. This struct does the waiting: scans, sleeps and process runs.
pub struct Orchestrator<E: ExecutorBackend> {
    core: CoreLoop,
    poller: Poller,
    spec: CommandSpec,
    executor: E,
    shutdown: CancellationToken,
}

impl<E: ExecutorBackend> fmt::Debug for Orchestrator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("core", &self.core)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Orchestrator<E> {
    pub fn new(
        poller: Poller,
        spec: CommandSpec,
        executor: E,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            core: CoreLoop::new(),
            poller,
            spec,
            executor,
            shutdown,
        }
    }

    /// Main loop.
    ///
    /// Runs until the shutdown token is cancelled and returns the number of
    /// completed cycles.
    pub async fn run(mut self) -> u64 {
        info!(mode = ?self.spec.mode(), interval = ?self.poller.interval(), "watching");

        let mut command = self.core.start();
        loop {
            debug!(?command, state = ?self.core.state(), "next loop command");

            let event = match command {
                LoopCommand::Snapshot => {
                    if self.shutdown.is_cancelled() {
                        LoopEvent::ShutdownRequested
                    } else {
                        LoopEvent::SnapshotTaken(self.poller.snapshot().await)
                    }
                }
                LoopCommand::Poll { reference } => {
                    match self.poller.wait_for_change(&reference, &self.shutdown).await {
                        Some(snapshot) => LoopEvent::ChangeDetected(snapshot),
                        None => LoopEvent::ShutdownRequested,
                    }
                }
                LoopCommand::Execute => {
                    info!(cycle = self.core.cycles() + 1, command = %self.spec, "running commands");
                    let result = self.executor.run(&self.spec, &self.shutdown).await;
                    if self.shutdown.is_cancelled() {
                        LoopEvent::ShutdownRequested
                    } else {
                        LoopEvent::CycleFinished(result)
                    }
                }
                LoopCommand::Exit => break,
            };

            command = self.core.step(event);
        }

        info!(cycles = self.core.cycles(), "orchestrator stopped");
        self.core.cycles()
    }
}
