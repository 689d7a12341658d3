// src/config/mod.rs

//! Runtime configuration.
//!
//! Everything nanny needs is resolved once at startup into [`Settings`] from
//! the two positional arguments and a handful of environment variables.
//! Components receive the values they need explicitly; nothing reads the
//! environment after startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::{CommandSpec, FailurePolicy};

pub mod loader;
pub mod validate;

pub use loader::{load_settings, load_settings_with};

/// Interpreter used in script mode.
#[cfg(not(windows))]
pub const SHELL_ENV: &str = "SHELL";
#[cfg(windows)]
pub const SHELL_ENV: &str = "COMSPEC";

/// `script` (default) or `split`.
pub const MODE_ENV: &str = "NANNY_MODE";
/// Separator between command lines in split mode.
pub const SEPARATOR_ENV: &str = "NANNY_SEPARATOR";
/// `continue` (default) or `abort`.
pub const ON_FAILURE_ENV: &str = "NANNY_ON_FAILURE";

pub const DEFAULT_SEPARATOR: &str = ";";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// File or directory to watch.
    pub target: PathBuf,
    pub spec: CommandSpec,
    /// Interpreter for script mode.
    pub interpreter: PathBuf,
    pub failure_policy: FailurePolicy,
    pub poll_interval: Duration,
}
