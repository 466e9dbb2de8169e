//! An in-memory filesystem that records every access.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{AsyncFileSystem, FileSystem};

#[derive(Debug, Clone)]
enum Entry {
    Directory,
    File(String),
    Failure(io::ErrorKind),
}

/// One access made through a [`MemoryFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    /// [`FileSystem::is_directory`] was asked about the path.
    IsDirectory(PathBuf),
    /// [`FileSystem::read_to_string`] was asked to read the path.
    Read(PathBuf),
}

/// In-memory filesystem for exercising the search without touching disk.
///
/// Adding a file or directory also creates every ancestor directory. Paths
/// are compared verbatim, so use absolute paths throughout.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use upward_config::{ConfigExplorer, MemoryFileSystem, SearchOptions};
///
/// let fs = MemoryFileSystem::new().with_file("/repo/.foorc", "found: true");
/// let explorer = ConfigExplorer::new(SearchOptions::builder("foo").build())
///     .with_filesystem(fs);
/// let found = explorer
///     .search_sync(Some(Path::new("/repo/src")))
///     .expect("search succeeds")
///     .expect("config exists");
/// assert_eq!(found.filepath, Path::new("/repo/.foorc"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    entries: HashMap<PathBuf, Entry>,
    calls: Mutex<Vec<FsCall>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory and its ancestors.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.entries.insert(path, Entry::Directory);
        self
    }

    /// Adds a text file and its ancestor directories.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.entries.insert(path, Entry::File(contents.into()));
        self
    }

    /// Makes every access to `path` fail with `kind`.
    #[must_use]
    pub fn with_error(mut self, path: impl Into<PathBuf>, kind: io::ErrorKind) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.entries.insert(path, Entry::Failure(kind));
        self
    }

    /// Every access so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.lock().clone()
    }

    /// Paths passed to `read_to_string` so far, in order.
    #[must_use]
    pub fn reads(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                FsCall::Read(path) => Some(path.clone()),
                FsCall::IsDirectory(_) => None,
            })
            .collect()
    }

    /// Forgets the recorded accesses.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.entries
                .entry(ancestor.to_path_buf())
                .or_insert(Entry::Directory);
        }
    }

    fn lookup(&self, path: &Path) -> io::Result<&Entry> {
        match self.entries.get(path) {
            Some(Entry::Failure(kind)) => Err(io::Error::from(*kind)),
            Some(entry) => Ok(entry),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        self.calls.lock().push(FsCall::IsDirectory(path.to_path_buf()));
        self.lookup(path)
            .map(|entry| matches!(entry, Entry::Directory))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.calls.lock().push(FsCall::Read(path.to_path_buf()));
        match self.lookup(path)? {
            Entry::File(contents) => Ok(contents.clone()),
            Entry::Directory | Entry::Failure(_) => {
                Err(io::Error::from(io::ErrorKind::IsADirectory))
            }
        }
    }
}

impl AsyncFileSystem for MemoryFileSystem {
    async fn is_directory(&self, path: &Path) -> io::Result<bool> {
        FileSystem::is_directory(self, path)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        FileSystem::read_to_string(self, path)
    }
}
