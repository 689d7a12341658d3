// src/watch/detector.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::trace;

use crate::fs::{FileSystem, RealFileSystem};

/// Newest modification time found under the watch target.
///
/// `path` is the entry that produced it and is only used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub modified: SystemTime,
    pub path: Option<PathBuf>,
}

impl Snapshot {
    /// The snapshot of an empty or unreachable tree.
    pub fn epoch() -> Self {
        Self {
            modified: SystemTime::UNIX_EPOCH,
            path: None,
        }
    }

    /// Strictly newer than `other`.
    pub fn is_newer_than(&self, other: &Snapshot) -> bool {
        self.modified > other.modified
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::epoch()
    }
}

/// Finds the newest modification time of every entry under a root path.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl ChangeDetector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, Arc::new(RealFileSystem))
    }

    pub fn with_fs(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the tree and return the newest entry.
    ///
    /// Files and directories both count. Ties keep the first entry seen; the
    /// timestamp does not depend on traversal order.
    pub fn latest_modification(&self) -> Snapshot {
        let snapshot = self
            .fs
            .walk(&self.root)
            .into_iter()
            .fold(Snapshot::epoch(), |newest, entry| {
                if entry.modified > newest.modified {
                    Snapshot {
                        modified: entry.modified,
                        path: Some(entry.path),
                    }
                } else {
                    newest
                }
            });
        trace!(root = ?self.root, newest = ?snapshot.path, "scan complete");
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn detector(fs: &MockFileSystem, root: &str) -> ChangeDetector {
        ChangeDetector::with_fs(root, Arc::new(fs.clone()))
    }

    #[test]
    fn picks_newest_entry_anywhere_in_tree() {
        let fs = MockFileSystem::new();
        fs.touch_at("proj/src/main.rs", 10);
        fs.touch_at("proj/src/deep/nested/mod.rs", 30);
        fs.touch_at("proj/README.md", 20);

        let snap = detector(&fs, "proj").latest_modification();
        assert_eq!(snap.path, Some(PathBuf::from("proj/src/deep/nested/mod.rs")));
    }

    #[test]
    fn single_file_root() {
        let fs = MockFileSystem::new();
        fs.touch_at("proj/a.txt", 10);
        fs.touch_at("proj/b.txt", 50);

        let snap = detector(&fs, "proj/a.txt").latest_modification();
        assert_eq!(snap.path, Some(PathBuf::from("proj/a.txt")));
    }

    #[test]
    fn directories_count_as_entries() {
        let fs = MockFileSystem::new();
        fs.touch_at("proj/file.txt", 10);
        fs.touch_at("proj/sub", 40);

        let snap = detector(&fs, "proj").latest_modification();
        assert_eq!(snap.path, Some(PathBuf::from("proj/sub")));
    }

    #[test]
    fn missing_root_yields_epoch() {
        let fs = MockFileSystem::new();
        let snap = detector(&fs, "nowhere").latest_modification();
        assert_eq!(snap, Snapshot::epoch());
        assert!(!snap.is_newer_than(&Snapshot::epoch()));
    }

    #[test]
    fn deleted_target_never_looks_newer() {
        let fs = MockFileSystem::new();
        fs.touch_at("proj/a.txt", 10);
        let d = detector(&fs, "proj");
        let before = d.latest_modification();
        fs.remove("proj");
        assert!(!d.latest_modification().is_newer_than(&before));
    }

    #[test]
    fn rescan_without_changes_is_stable() {
        let fs = MockFileSystem::new();
        fs.touch_at("proj/a.txt", 10);
        fs.touch_at("proj/b/c.txt", 11);
        let d = detector(&fs, "proj");
        assert_eq!(d.latest_modification(), d.latest_modification());
    }
}
