// src/config/validate.rs

use std::path::Path;

use crate::errors::{NannyError, Result};
use crate::fs::FileSystem;

/// The watch target must exist when nanny starts. It is not checked again
/// later; a target deleted at runtime simply never looks newer.
pub fn validate_target(fs: &dyn FileSystem, target: &Path) -> Result<()> {
    fs.check_exists(target)
        .map_err(|source| NannyError::TargetNotFound {
            path: target.to_path_buf(),
            source,
        })
}

/// The interpreter variable must be set and non-empty.
pub fn validate_interpreter(var: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(NannyError::MissingInterpreter { var }),
    }
}
