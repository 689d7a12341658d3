// src/logging.rs

//! Logging setup for `nanny` using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `NANNY_LOG` environment variable (e.g. "info",
//! "debug") and defaults to `warn`, so a normal run only shows the output
//! of the user's commands.
//!
//! Logs are sent to STDERR so that stdout stays free for command output.

use anyhow::Result;
use tracing_subscriber::fmt;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "NANNY_LOG";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(env_level: Option<&str>) -> Result<()> {
    let level = level_or_default(env_level);

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

fn level_or_default(env_level: Option<&str>) -> tracing::Level {
    env_level
        .and_then(parse_level_str)
        .unwrap_or(tracing::Level::WARN)
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_defaults_to_warn() {
        assert_eq!(level_or_default(None), tracing::Level::WARN);
        assert_eq!(level_or_default(Some("loud")), tracing::Level::WARN);
        assert_eq!(level_or_default(Some(" Debug ")), tracing::Level::DEBUG);
        assert_eq!(level_or_default(Some("warning")), tracing::Level::WARN);
    }
}
