// src/fs/mod.rs

//! Filesystem access used by executable resolution.
//!
//! Resolution only ever asks metadata questions, so the trait is limited to
//! those. Tests swap in [`mock::MockFileSystem`].

use std::fmt::Debug;
use std::path::Path;

pub mod mock;

/// Abstract, read-only view of the filesystem.
pub trait FileSystem: Send + Sync + Debug {
    /// Whether `path` exists and is a regular file (symlinks followed).
    fn is_file(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs` metadata.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
