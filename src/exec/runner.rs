// src/exec/runner.rs

//! Single process runner.

use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::{CommandOutcome, CommandRecord};
use crate::types::tokenize;

/// Run `script` by writing it to the stdin of a fresh `interpreter` process.
///
/// stdout/stderr are inherited so output shows up live. stdin is closed after
/// the script has been written, which lets the interpreter exit at the end.
pub async fn run_script(
    interpreter: &Path,
    script: &str,
    shutdown: &CancellationToken,
) -> CommandRecord {
    let label = interpreter.display().to_string();
    let mut cmd = Command::new(interpreter);
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => return spawn_failed(label, err),
    };

    if let Some(mut stdin) = child.stdin.take() {
        let write = async {
            stdin.write_all(script.as_bytes()).await?;
            stdin.shutdown().await
        };
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                return CommandRecord::new(label, kill(&mut child).await);
            }
            res = write => {
                // The interpreter may exit before reading everything.
                if let Err(err) = res {
                    debug!(error = %err, "writing script to interpreter stdin failed");
                }
            }
        }
    }

    let outcome = wait_or_cancel(&mut child, &label, shutdown).await;
    CommandRecord::new(label, outcome)
}

/// Run one command line as a process: first whitespace token is the program,
/// the rest are arguments. No shell is involved.
pub async fn run_line(line: &str, shutdown: &CancellationToken) -> CommandRecord {
    let Some((program, args)) = tokenize(line) else {
        return CommandRecord::new(line.to_string(), CommandOutcome::Success);
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => return spawn_failed(line.to_string(), err),
    };

    let outcome = wait_or_cancel(&mut child, line, shutdown).await;
    CommandRecord::new(line.to_string(), outcome)
}

fn spawn_failed(label: String, err: std::io::Error) -> CommandRecord {
    warn!(command = %label, error = %err, "failed to spawn process");
    CommandRecord::new(label, CommandOutcome::SpawnFailed(err.to_string()))
}

/// Either the process exits on its own (normal case), or shutdown is
/// requested and the child is killed and reaped.
async fn wait_or_cancel(
    child: &mut Child,
    label: &str,
    shutdown: &CancellationToken,
) -> CommandOutcome {
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => kill(child).await,
        status = child.wait() => match status {
            Ok(status) => {
                let code = status.code().unwrap_or(-1);
                debug!(
                    command = %label,
                    exit_code = code,
                    success = status.success(),
                    "process exited"
                );
                if status.success() {
                    CommandOutcome::Success
                } else {
                    CommandOutcome::Failed(code)
                }
            }
            Err(err) => {
                warn!(command = %label, error = %err, "waiting for process failed");
                CommandOutcome::Failed(-1)
            }
        },
    }
}

async fn kill(child: &mut Child) -> CommandOutcome {
    info!("shutdown requested; killing running process");
    // `kill` also waits, so no zombie is left behind.
    if let Err(err) = child.kill().await {
        warn!(error = %err, "failed to kill child process on shutdown");
    }
    CommandOutcome::Cancelled
}
