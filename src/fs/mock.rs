// src/fs/mock.rs

use super::FileSystem;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntry {
    File,
    Dir,
}

/// In-memory filesystem keyed by the exact path used to register an entry.
///
/// Paths are not normalised: `./tool` and `tool` are different entries, which
/// matches how resolution builds its candidates.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.lock().insert(PathBuf::from("."), MockEntry::Dir);
        fs
    }

    /// Register a regular file, creating its parent directories implicitly.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut entries = self.lock();
        entries.insert(path.to_path_buf(), MockEntry::File);
        if let Some(parent) = path.parent() {
            ensure_dir_entry(&mut entries, parent);
        }
    }

    /// Register a directory (and its ancestors).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut entries = self.lock();
        ensure_dir_entry(&mut entries, path.as_ref());
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn entry(&self, path: &Path) -> Option<MockEntry> {
        self.lock().get(path).copied()
    }
}

fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if path.as_os_str().is_empty() || entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir);
    if let Some(parent) = path.parent() {
        // Root has no parent, so this terminates.
        ensure_dir_entry(entries, parent);
    }
}

impl FileSystem for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.entry(path) == Some(MockEntry::File)
    }
}
