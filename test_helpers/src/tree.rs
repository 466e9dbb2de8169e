//! Temporary directory trees for real-filesystem search tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary directory populated with configuration candidates.
///
/// The directory and everything in it is removed when the tree is dropped.
///
/// # Examples
///
/// ```
/// use upward_config_test_helpers::tree::ConfigTree;
///
/// let tree = ConfigTree::new()
///     .and_then(|tree| tree.file("a/.foorc", "found: true"))
///     .and_then(|tree| tree.dir("a/b/c"))
///     .expect("build tree");
/// assert!(tree.path("a/.foorc").is_file());
/// assert!(tree.path("a/b/c").is_dir());
/// ```
#[derive(Debug)]
pub struct ConfigTree {
    root: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Fails when the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let root = tempfile::tempdir().context("create temporary tree")?;
        Ok(Self { root })
    }

    /// Absolute path of the tree root, with symlinks resolved so it matches
    /// the paths a search reports.
    ///
    /// # Errors
    ///
    /// Fails when the root cannot be canonicalised.
    pub fn root(&self) -> Result<PathBuf> {
        self.root
            .path()
            .canonicalize()
            .context("canonicalise tree root")
    }

    /// `relative` joined onto the (uncanonicalised) root.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Creates `relative` and its parents as directories.
    ///
    /// # Errors
    ///
    /// Fails when the directories cannot be created.
    pub fn dir(self, relative: impl AsRef<Path>) -> Result<Self> {
        let path = self.path(relative);
        fs::create_dir_all(&path).with_context(|| format!("create {}", path.display()))?;
        Ok(self)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails when the file or its parents cannot be written.
    pub fn file(self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<Self> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(self)
    }
}
