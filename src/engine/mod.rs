// src/engine/mod.rs

//! Orchestration engine for nanny.
//!
//! The loop alternates between two states forever:
//! - `Watching`: snapshot the target, poll until something is newer.
//! - `Running`: run the command spec once, whatever its outcome.
//!
//! The pure state machine lives in [`core`]; the async/IO shell that scans,
//! sleeps and spawns processes is implemented in [`runtime`].

use std::fmt;

/// How a single command process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Non-zero exit; `-1` when terminated by a signal.
    Failed(i32),
    /// The process could not be started at all.
    SpawnFailed(String),
    /// Killed because shutdown was requested while it ran.
    Cancelled,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Success => f.write_str("success"),
            CommandOutcome::Failed(code) => write!(f, "exit status {code}"),
            CommandOutcome::SpawnFailed(reason) => write!(f, "spawn failed: {reason}"),
            CommandOutcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// One command and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub command: String,
    pub outcome: CommandOutcome,
}

impl CommandRecord {
    pub fn new(command: impl Into<String>, outcome: CommandOutcome) -> Self {
        Self {
            command: command.into(),
            outcome,
        }
    }
}

/// Outcome of one `Running` phase. Only ever logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleResult {
    records: Vec<CommandRecord>,
}

impl CycleResult {
    pub fn push(&mut self, record: CommandRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[CommandRecord] {
        &self.records
    }

    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| !r.outcome.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

impl FromIterator<CommandRecord> for CycleResult {
    fn from_iter<T: IntoIterator<Item = CommandRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

pub mod core;
pub mod runtime;

pub use self::core::{CoreLoop, LoopCommand, LoopEvent, LoopState};
pub use self::runtime::Orchestrator;
