//! Upward directory traversal.
//!
//! [`AncestorWalk`] yields the start directory followed by each ancestor,
//! stopping after the stop directory or at the filesystem root. Ascent is
//! purely lexical: the walk never touches the filesystem, so callers decide
//! what to do with each directory before pulling the next one.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Lazy iterator over a directory and its ancestors.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use upward_config::AncestorWalk;
///
/// let dirs: Vec<PathBuf> = AncestorWalk::new("/repo/a/b", "/repo").collect();
/// assert_eq!(
///     dirs,
///     [
///         PathBuf::from("/repo/a/b"),
///         PathBuf::from("/repo/a"),
///         PathBuf::from("/repo"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AncestorWalk {
    next: Option<PathBuf>,
    stop: PathBuf,
}

impl AncestorWalk {
    /// Starts a walk at `start` that ends after yielding `stop`.
    ///
    /// When `stop` is not an ancestor of `start` the walk continues until the
    /// filesystem root.
    #[must_use]
    pub fn new(start: impl Into<PathBuf>, stop: impl Into<PathBuf>) -> Self {
        Self {
            next: Some(start.into()),
            stop: stop.into(),
        }
    }
}

impl Iterator for AncestorWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current != self.stop {
            self.next = current
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf);
        }
        Some(current)
    }
}

impl std::iter::FusedIterator for AncestorWalk {}

/// Makes `path` absolute against the current directory and removes `.` and
/// `..` components without consulting the filesystem.
///
/// # Errors
///
/// Returns an error when `path` is relative and the current directory cannot
/// be determined.
pub fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(normalise(&absolute))
}

/// Lexically removes `.` and `..` components. `..` never climbs above the
/// root.
#[must_use]
pub fn normalise(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn walk(start: &str, stop: &str) -> Vec<PathBuf> {
        AncestorWalk::new(start, stop).collect()
    }

    #[test]
    fn start_equal_to_stop_yields_one_directory() {
        assert_eq!(walk("/repo", "/repo"), [PathBuf::from("/repo")]);
    }

    #[cfg(unix)]
    #[test]
    fn unrelated_stop_runs_to_the_root() {
        assert_eq!(
            walk("/repo/a", "/elsewhere"),
            [
                PathBuf::from("/repo/a"),
                PathBuf::from("/repo"),
                PathBuf::from("/")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn root_stop_includes_the_root() {
        let dirs = walk("/a/b", "/");
        assert_eq!(dirs.last(), Some(&PathBuf::from("/")));
        assert_eq!(dirs.len(), 3);
    }

    #[test]
    fn walks_are_restartable() {
        let first = AncestorWalk::new("/x/y/z", "/x");
        let second = first.clone();
        assert_eq!(first.collect::<Vec<_>>(), second.collect::<Vec<_>>());
    }

    #[test]
    fn trailing_separators_still_match_the_stop_directory() {
        assert_eq!(walk("/repo/a/", "/repo/").len(), 2);
    }

    #[cfg(unix)]
    #[rstest]
    #[case("/a/./b", "/a/b")]
    #[case("/a/b/../c", "/a/c")]
    #[case("/../a", "/a")]
    #[case("/a/b/..", "/a")]
    fn normalise_is_lexical(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalise(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn resolve_anchors_relative_paths_at_the_current_directory() -> std::io::Result<()> {
        let resolved = resolve(Path::new("some/dir/.."))?;
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some"));
        Ok(())
    }
}
