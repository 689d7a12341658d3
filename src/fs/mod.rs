// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::trace;
use walkdir::WalkDir;

pub mod mock;

/// A single entry seen while walking a tree, with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStamp {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Stat `path`, returning the OS error if it is not reachable.
    fn check_exists(&self, path: &Path) -> io::Result<()>;

    /// Every entry reachable from `root` (including `root` itself), with its
    /// modification time.
    ///
    /// Entries that cannot be stat'ed are skipped. An unreachable root yields
    /// nothing.
    fn walk(&self, root: &Path) -> Vec<EntryStamp>;
}

/// Implementation backed by `std::fs` and `walkdir`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn check_exists(&self, path: &Path) -> io::Result<()> {
        fs::metadata(path).map(|_| ())
    }

    fn walk(&self, root: &Path) -> Vec<EntryStamp> {
        // Symlinks are reported but never followed, so cycles can't occur.
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    trace!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter_map(|entry| {
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some(EntryStamp {
                    path: entry.into_path(),
                    modified,
                })
            })
            .collect()
    }
}
