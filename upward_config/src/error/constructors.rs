//! Shorthand constructors returning shared errors.

use std::io;
use std::path::Path;
use std::sync::Arc;

use super::{Location, ParseErrorKind, UpwardError};

impl UpwardError {
    /// Builds an [`UpwardError::Input`] for `path`.
    #[must_use]
    pub fn input(path: &Path, source: io::Error) -> Arc<Self> {
        Arc::new(Self::Input {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds an [`UpwardError::Read`] for `path`.
    #[must_use]
    pub fn read(path: &Path, source: io::Error) -> Arc<Self> {
        Arc::new(Self::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds an [`UpwardError::Parse`] for `path`.
    #[must_use]
    pub fn parse(
        path: &Path,
        kind: ParseErrorKind,
        message: impl Into<String>,
        location: Option<Location>,
    ) -> Arc<Self> {
        Arc::new(Self::Parse {
            path: path.to_path_buf(),
            kind,
            message: message.into(),
            location,
        })
    }

    /// Builds an [`UpwardError::Transform`] for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use upward_config::UpwardError;
    ///
    /// let err = UpwardError::transform(Path::new("/repo/.foorc"), "missing `name`");
    /// assert!(err.to_string().contains("missing `name`"));
    /// ```
    #[must_use]
    pub fn transform(path: &Path, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Transform {
            path: path.to_path_buf(),
            message: message.into(),
        })
    }

    /// Returns the parse classification when this is a parse failure.
    #[must_use]
    pub const fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            Self::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the file or directory the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Input { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Transform { path, .. } => Some(path),
            Self::Extract(_) => None,
        }
    }
}

impl From<figment::Error> for UpwardError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}
