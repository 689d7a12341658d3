// src/fs/mock.rs

use super::{EntryStamp, FileSystem};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// In-memory filesystem holding only paths and modification times.
///
/// Clones share state, so a test can keep a handle and mutate the tree while
/// a detector owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, SystemTime>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update an entry, creating missing parents at the epoch.
    pub fn set_modified(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let path = path.as_ref();
        let mut entries = self.entries.lock().unwrap();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(SystemTime::UNIX_EPOCH);
        }
        entries.insert(path.to_path_buf(), modified);
    }

    /// Set the modification time to `secs` seconds past the epoch.
    pub fn touch_at(&self, path: impl AsRef<Path>, secs: u64) {
        self.set_modified(path, SystemTime::UNIX_EPOCH + Duration::from_secs(secs));
    }

    /// Remove an entry and everything below it.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|p, _| !p.starts_with(path));
    }
}

impl FileSystem for MockFileSystem {
    fn check_exists(&self, path: &Path) -> io::Result<()> {
        let entries = self.entries.lock().unwrap();
        if entries.contains_key(path) {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no such file or directory",
            ))
        }
    }

    fn walk(&self, root: &Path) -> Vec<EntryStamp> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .filter(|(path, _)| path.starts_with(root))
            .map(|(path, modified)| EntryStamp {
                path: path.clone(),
                modified: *modified,
            })
            .collect()
    }
}
