// src/engine/core.rs

//! Pure core state machine.
//!
//! This module contains a synchronous, deterministic "core loop" that
//! consumes [`LoopEvent`]s and produces:
//! - an updated state (`Watching` / `Running`)
//! - the [`LoopCommand`] describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Orchestrator`) is responsible for
//! scanning, sleeping, spawning processes and observing shutdown. The core is
//! unit tested without any Tokio, filesystem or processes.

use tracing::{debug, warn};

use crate::watch::Snapshot;

use super::CycleResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Watching,
    Running,
}

/// Inputs reported by the IO shell.
#[derive(Debug, Clone)]
pub enum LoopEvent {
    /// The reference scan taken on entering `Watching`.
    SnapshotTaken(Snapshot),
    /// A scan returned something strictly newer than the reference.
    ChangeDetected(Snapshot),
    /// The executor returned from a `Running` phase.
    CycleFinished(CycleResult),
    ShutdownRequested,
}

/// What the IO shell must do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopCommand {
    /// Take a fresh reference snapshot.
    Snapshot,
    /// Poll until something is newer than `reference`.
    Poll { reference: Snapshot },
    /// Run the command spec once.
    Execute,
    Exit,
}

#[derive(Debug)]
pub struct CoreLoop {
    state: LoopState,
    reference: Snapshot,
    cycles: u64,
    failed_cycles: u64,
}

impl Default for CoreLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Watching,
            reference: Snapshot::epoch(),
            cycles: 0,
            failed_cycles: 0,
        }
    }

    /// The first command: snapshot the target.
    pub fn start(&self) -> LoopCommand {
        LoopCommand::Snapshot
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn reference(&self) -> &Snapshot {
        &self.reference
    }

    /// Number of completed `Running` phases.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles
    }

    pub fn step(&mut self, event: LoopEvent) -> LoopCommand {
        match (self.state, event) {
            (_, LoopEvent::ShutdownRequested) => LoopCommand::Exit,

            (LoopState::Watching, LoopEvent::SnapshotTaken(snapshot)) => {
                self.reference = snapshot;
                LoopCommand::Poll {
                    reference: self.reference.clone(),
                }
            }

            (LoopState::Watching, LoopEvent::ChangeDetected(snapshot)) => {
                debug!(path = ?snapshot.path, cycle = self.cycles + 1, "entering running state");
                self.state = LoopState::Running;
                LoopCommand::Execute
            }

            (LoopState::Running, LoopEvent::CycleFinished(result)) => {
                self.cycles += 1;
                if !result.is_success() {
                    self.failed_cycles += 1;
                    for record in result.records().iter().filter(|r| !r.outcome.is_success()) {
                        warn!(
                            cycle = self.cycles,
                            command = %record.command,
                            outcome = %record.outcome,
                            "command failed"
                        );
                    }
                }
                self.state = LoopState::Watching;
                LoopCommand::Snapshot
            }

            (state, event) => {
                // Out-of-order input from the shell; resynchronise by
                // re-entering the current state.
                warn!(?state, ?event, "unexpected loop event");
                match state {
                    LoopState::Watching => LoopCommand::Snapshot,
                    LoopState::Running => LoopCommand::Execute,
                }
            }
        }
    }
}
