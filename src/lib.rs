// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod shutdown;
pub mod types;
pub mod watch;

use tracing::{debug, info};

use crate::config::Settings;
use crate::engine::Orchestrator;
use crate::exec::RealExecutorBackend;
use crate::shutdown::{Shutdown, ShutdownReason, spawn_ctrl_c_listener, spawn_input_watchdog};
use crate::watch::{ChangeDetector, Poller};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - change detection + poller on the watch target
/// - executor (interpreter resolved at startup)
/// - stdin-EOF watchdog and Ctrl-C handling
/// - the orchestrator loop
///
/// Returns once shutdown has been requested, with the reason.
pub async fn run(settings: Settings) -> Option<ShutdownReason> {
    let shutdown = Shutdown::new();
    let _watchdog = spawn_input_watchdog(tokio::io::stdin(), shutdown.clone());
    let _ctrl_c = spawn_ctrl_c_listener(shutdown.clone());

    info!(path = ?settings.target, interpreter = ?settings.interpreter, "nanny starting");

    let detector = ChangeDetector::new(settings.target.clone());
    let poller = Poller::new(detector, settings.poll_interval);
    let executor = RealExecutorBackend::new(settings.interpreter.clone(), settings.failure_policy);

    let orchestrator = Orchestrator::new(poller, settings.spec, executor, shutdown.token());
    let cycles = orchestrator.run().await;

    debug!(cycles, reason = ?shutdown.reason(), "nanny exiting");
    shutdown.reason()
}
