//! Core error enum and parse classification.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that terminate a configuration search.
///
/// A missing candidate or a file without usable configuration is never an
/// error; the search reports those as `Ok(None)` instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpwardError {
    /// An explicitly configured path, or a directory reached while walking,
    /// could not be accessed.
    #[error("cannot access '{}': {source}", path.display())]
    Input {
        /// Path that could not be accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A candidate file exists but reading it failed.
    #[error("failed to read configuration file '{}': {source}", path.display())]
    Read {
        /// Candidate that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A candidate file exists but its content is malformed.
    #[error("{kind} in '{}'{}: {message}", path.display(), DisplayLocation(*location))]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Which parser rejected the content.
        kind: ParseErrorKind,
        /// Message reported by the parser.
        message: String,
        /// Position of the failure, when the parser reports one.
        location: Option<Location>,
    },

    /// A caller-supplied transform rejected a loaded configuration.
    #[error("transform failed for '{}': {message}", path.display())]
    Transform {
        /// File whose configuration was being transformed.
        path: PathBuf,
        /// Reason supplied by the transform.
        message: String,
    },

    /// Deserializing a loaded configuration into a typed value failed.
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Classification of the parser that rejected a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Strict JSON (`package.json`, `.{name}rc.json`, strict rc files).
    Json,
    /// YAML, which also accepts plain JSON.
    Yaml,
    /// A JavaScript module that does not parse.
    JsSyntax,
    /// A JavaScript module that parses but cannot produce an export value.
    JsEvaluation,
}

impl ParseErrorKind {
    /// Stable classification tag for this kind.
    ///
    /// ```
    /// use upward_config::ParseErrorKind;
    /// assert_eq!(ParseErrorKind::Yaml.name(), "YAMLError");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSONError",
            Self::Yaml => "YAMLError",
            Self::JsSyntax => "JSSyntaxError",
            Self::JsEvaluation => "JSEvaluationError",
        }
    }

    /// Returns `true` for either JavaScript classification.
    #[must_use]
    pub const fn is_js(self) -> bool {
        matches!(self, Self::JsSyntax | Self::JsEvaluation)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One-based line and column of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// One-based line number.
    pub line: usize,
    /// One-based column number.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

struct DisplayLocation(Option<Location>);

impl fmt::Display for DisplayLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.0 {
            write!(f, " at {location}")?;
        }
        Ok(())
    }
}
