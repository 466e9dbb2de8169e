//! Serialised changes of the process working directory.
//!
//! Searches without an explicit start directory begin at the current
//! directory, which is shared by every test in the process. [`enter`] holds a
//! global lock for as long as its guard lives and puts the previous directory
//! back afterwards.
//!
//! # Examples
//!
//! ```no_run
//! use upward_config_test_helpers::cwd;
//!
//! let guard = cwd::enter("/tmp").expect("enter directory");
//! assert!(!guard.previous().as_str().is_empty());
//! ```

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::{Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Restores the previous working directory when dropped.
#[must_use = "dropping the guard restores the previous working directory"]
pub struct CwdGuard {
    previous: Utf8PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// The directory that was current before [`enter`].
    #[must_use]
    pub fn previous(&self) -> &Utf8Path {
        &self.previous
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _restored = std::env::set_current_dir(&self.previous);
    }
}

/// Makes `dir` the working directory until the returned guard is dropped.
///
/// # Errors
///
/// Fails when the current directory is unreadable or not UTF-8, or when
/// `dir` cannot be entered. The working directory is unchanged on failure.
pub fn enter(dir: impl AsRef<Path>) -> Result<CwdGuard> {
    let lock = CWD_LOCK.lock();
    let current = std::env::current_dir().context("read current directory")?;
    let previous = Utf8PathBuf::from_path_buf(current)
        .map_err(|path| anyhow!("current directory is not UTF-8: {}", path.display()))?;
    std::env::set_current_dir(dir.as_ref())
        .with_context(|| format!("enter {}", dir.as_ref().display()))?;
    Ok(CwdGuard {
        previous,
        _lock: lock,
    })
}
