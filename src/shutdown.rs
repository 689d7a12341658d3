// src/shutdown.rs

//! Shutdown signalling.
//!
//! Two sources can end the process: end-of-stream on stdin (the watchdog)
//! and Ctrl-C. Both cancel one shared `CancellationToken`; the orchestrator
//! and the executor observe the token and unwind on their own.
//!
//! Treating stdin EOF as a stop signal matters when nanny is started as a
//! detached process by another detached process: nobody would otherwise
//! reap it once the owning session ends.

use std::sync::{Arc, OnceLock};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The controlling input stream reached end-of-stream.
    InputClosed,
    /// Ctrl-C / SIGINT.
    Interrupted,
}

/// Cancellation token plus the reason it was first cancelled for.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
    reason: Arc<OnceLock<ShutdownReason>>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Record `reason` (first caller wins) and cancel the token.
    pub fn trigger(&self, reason: ShutdownReason) {
        if self.reason.set(reason).is_ok() {
            info!(?reason, "shutdown requested");
        }
        self.token.cancel();
    }

    pub fn reason(&self) -> Option<ShutdownReason> {
        self.reason.get().copied()
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Spawn the stdin watchdog.
///
/// Reads `input` one byte at a time and discards the data. Only a real
/// end-of-stream triggers shutdown; a read error just stops the watchdog.
pub fn spawn_input_watchdog<R>(mut input: R, shutdown: Shutdown) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let token = shutdown.token();
        let mut buf = [0u8; 1];
        loop {
            let read = tokio::select! {
                biased;
                _ = token.cancelled() => return,
                read = input.read(&mut buf) => read,
            };

            match read {
                Ok(0) => {
                    shutdown.trigger(ShutdownReason::InputClosed);
                    return;
                }
                Ok(_) => {}
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
                Err(err) => {
                    debug!(error = %err, "stdin watchdog stopped on read error");
                    return;
                }
            }
        }
    })
}

/// Spawn a task that turns Ctrl-C into a graceful shutdown.
pub fn spawn_ctrl_c_listener(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        let token = shutdown.token();
        tokio::select! {
            _ = token.cancelled() => {}
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => shutdown.trigger(ShutdownReason::Interrupted),
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            },
        }
    })
}
