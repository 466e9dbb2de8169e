//! Filesystem primitives consumed by the search drivers.
//!
//! The search only ever asks two questions: is this path a directory, and
//! what does this file contain. Both answers keep the raw [`io::Error`] so
//! the engine can tell a missing path (`ErrorKind::NotFound`) apart from a
//! real failure.

mod memory;

use std::future::Future;
use std::io;
use std::path::Path;

pub use memory::{FsCall, MemoryFileSystem};

/// Blocking filesystem access.
pub trait FileSystem: Send + Sync {
    /// Returns whether `path` is a directory.
    ///
    /// `Ok(false)` means the path exists but is something else.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::NotFound` when nothing exists at `path`, and any
    /// other error when the path cannot be inspected.
    fn is_directory(&self, path: &Path) -> io::Result<bool>;

    /// Reads `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::NotFound` for a missing file; every other error
    /// (including invalid UTF-8) is a read failure.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Non-blocking counterpart of [`FileSystem`].
pub trait AsyncFileSystem: Send + Sync {
    /// See [`FileSystem::is_directory`].
    fn is_directory(&self, path: &Path) -> impl Future<Output = io::Result<bool>> + Send;

    /// See [`FileSystem::read_to_string`].
    fn read_to_string(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;
}

/// The host filesystem: `std::fs` when blocking, `tokio::fs` when async.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileSystem;

impl FileSystem for NativeFileSystem {
    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        std::fs::metadata(path).map(|metadata| metadata.is_dir())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(feature = "tokio")]
impl AsyncFileSystem for NativeFileSystem {
    async fn is_directory(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::metadata(path)
            .await
            .map(|metadata| metadata.is_dir())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}
