// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NannyError {
    /// Wrong number of positional arguments. Carries the usage text.
    #[error("{0}")]
    Usage(String),

    /// The watch target could not be stat'ed at startup.
    #[error("{}: {}", path.display(), os_error_detail(source))]
    TargetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing {var} environment variable")]
    MissingInterpreter { var: &'static str },

    #[error("invalid {var}: {value} (expected {expected})")]
    InvalidSetting {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NannyError {
    /// Startup errors are reported verbatim to the user and end the process
    /// with status 1.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            NannyError::Usage(_)
                | NannyError::TargetNotFound { .. }
                | NannyError::MissingInterpreter { .. }
                | NannyError::InvalidSetting { .. }
        )
    }
}

/// Render an IO error without the trailing "(os error N)" suffix.
fn os_error_detail(err: &std::io::Error) -> String {
    let text = err.to_string();
    match text.find(" (os error") {
        Some(idx) => text[..idx].to_lowercase(),
        None => text,
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, NannyError>;
