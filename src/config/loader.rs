// src/config/loader.rs

use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::config::validate::{validate_interpreter, validate_target};
use crate::config::{
    DEFAULT_SEPARATOR, MODE_ENV, ON_FAILURE_ENV, SEPARATOR_ENV, SHELL_ENV, Settings,
};
use crate::errors::{NannyError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::{CommandSpec, ExecutionMode, FailurePolicy};
use crate::watch::DEFAULT_POLL_INTERVAL;

/// Resolve settings from parsed arguments and the process environment.
pub fn load_settings(args: &CliArgs) -> Result<Settings> {
    load_settings_with(args, &RealFileSystem, |key| std::env::var(key).ok())
}

/// Resolve settings with an injected filesystem and environment lookup.
///
/// Checks run in this order, stopping at the first failure:
/// - the watch target exists,
/// - the interpreter variable is set,
/// - optional `NANNY_*` settings are valid.
pub fn load_settings_with<F>(args: &CliArgs, fs: &dyn FileSystem, env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    validate_target(fs, &args.target)?;

    let interpreter = validate_interpreter(SHELL_ENV, env(SHELL_ENV))?;

    let mode: ExecutionMode =
        parse_env(&env, MODE_ENV, "\"script\" or \"split\"")?.unwrap_or_default();
    let failure_policy: FailurePolicy =
        parse_env(&env, ON_FAILURE_ENV, "\"continue\" or \"abort\"")?.unwrap_or_default();
    let separator = env(SEPARATOR_ENV).unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());

    Ok(Settings {
        target: args.target.clone(),
        spec: CommandSpec::from_text(&args.command, mode, &separator),
        interpreter: PathBuf::from(interpreter),
        failure_policy,
        poll_interval: DEFAULT_POLL_INTERVAL,
    })
}

fn parse_env<F, T>(env: &F, var: &'static str, expected: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr<Err = String>,
{
    match env(var) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|value| NannyError::InvalidSetting {
                var,
                value,
                expected,
            }),
    }
}
