//! Scratch directory trees for lupe-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary tree of directories and `.lupe.toml` files, removed on drop.
pub struct TestDir(TempDir);

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` (and its parents) under the root.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.lupe.toml` into `rel` and returns its path.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.mkdir(rel).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}
