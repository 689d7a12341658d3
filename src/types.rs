// src/types.rs

use std::fmt;
use std::str::FromStr;

/// How the command text given on the command line is executed.
///
/// - `Script`: the whole text is fed to the interpreter on stdin, so the
///   interpreter's own statement separators apply (default).
/// - `Split`: the text is cut into command lines, each run as its own
///   process without a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Script,
    Split,
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "script" => Ok(ExecutionMode::Script),
            "split" => Ok(ExecutionMode::Split),
            other => Err(other.to_string()),
        }
    }
}

/// What split mode does with the remaining lines once one of them fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Attempt every line exactly once per cycle.
    #[default]
    Continue,
    /// Skip the rest of the cycle after the first failure.
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(other.to_string()),
        }
    }
}

/// The user's command text, in the shape the selected mode needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Opaque script handed to the interpreter on stdin.
    Script(String),
    /// Ordered command lines, each executed as an independent process.
    Split(Vec<String>),
}

impl CommandSpec {
    /// Build the spec for `mode` from raw command text.
    ///
    /// In split mode the text is cut on `separator` and on newlines; blank
    /// pieces are dropped.
    pub fn from_text(text: &str, mode: ExecutionMode, separator: &str) -> Self {
        match mode {
            ExecutionMode::Script => CommandSpec::Script(text.to_string()),
            ExecutionMode::Split => CommandSpec::Split(split_lines(text, separator)),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            CommandSpec::Script(_) => ExecutionMode::Script,
            CommandSpec::Split(_) => ExecutionMode::Split,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSpec::Script(text) => f.write_str(text),
            CommandSpec::Split(lines) => f.write_str(&lines.join("; ")),
        }
    }
}

fn split_lines(text: &str, separator: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if separator.is_empty() {
                vec![line]
            } else {
                line.split(separator).collect()
            }
        })
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a command line into program and arguments on whitespace.
///
/// No quoting or expansion. Returns `None` for a blank line.
pub fn tokenize(line: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = line.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}
