// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The surface is exactly two positionals and no flags: `--help` or `-dash`
//! are plain values. Any other argument count is reported with [`USAGE`]
//! instead of clap's own error text, and ends the process with status 1.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::errors::{NannyError, Result};

pub const USAGE: &str = r#"Usage: nanny <file/dir> <commands>

Examples:

    nanny . "cargo build; echo 'rinse, repeat'"
    nanny README.md "pandoc README.md -o temp.html; open temp.html"
"#;

/// Command-line arguments for `nanny`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nanny",
    about = "Watch a file or directory and run commands whenever it changes.",
    override_usage = "nanny <file/dir> <commands>",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// File or directory to watch (recursively).
    #[arg(value_name = "PATH", allow_hyphen_values = true)]
    pub target: PathBuf,

    /// Commands to run after each change.
    #[arg(value_name = "COMMANDS", allow_hyphen_values = true)]
    pub command: String,
}

/// Parse `args` (including the program name).
pub fn try_parse_from<I, T>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(args).map_err(|err| {
        tracing::debug!(kind = ?err.kind(), "rejected command line");
        NannyError::Usage(USAGE.to_string())
    })
}
