//! Candidate file enumeration.
//!
//! Each searched directory contributes the same fixed sequence of candidate
//! files. The sequence lives in [`candidates_for`] as one ordered list so the
//! precedence is visible in a single place.

use std::path::{Path, PathBuf};

use crate::options::{ConfigFormat, SearchOptions};

/// The closed set of recognised configuration file forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    /// `package.json`; only the value under `property` is configuration.
    PackageJson {
        /// Key (or dotted path) holding the configuration.
        property: String,
    },
    /// `.{name}rc`, YAML by default or strict JSON when requested.
    RcPlain {
        /// Parse as strict JSON instead of YAML.
        strict_json: bool,
    },
    /// `.{name}rc.json`.
    RcJson,
    /// `.{name}rc.yaml` or `.{name}rc.yml`.
    RcYaml,
    /// `.{name}rc.js`.
    RcJs,
    /// `{name}.config.js`.
    ConfigJs,
}

impl CandidateKind {
    /// Returns `true` when the candidate is evaluated as a JavaScript module.
    #[must_use]
    pub const fn is_module(&self) -> bool {
        matches!(self, Self::RcJs | Self::ConfigJs)
    }
}

/// One file considered during a directory probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Which parser applies and how configuration is extracted.
    pub kind: CandidateKind,
}

impl Candidate {
    /// Creates a candidate for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: CandidateKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Returns the ordered candidates for `directory`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use upward_config::{SearchOptions, candidates_for};
///
/// let options = SearchOptions::builder("foo").build();
/// let names: Vec<_> = candidates_for(Path::new("/repo"), &options)
///     .into_iter()
///     .map(|candidate| candidate.path)
///     .collect();
/// assert_eq!(
///     names,
///     [
///         Path::new("/repo/package.json"),
///         Path::new("/repo/.foorc"),
///         Path::new("/repo/foo.config.js"),
///     ]
/// );
/// ```
#[must_use]
pub fn candidates_for(directory: &Path, options: &SearchOptions) -> Vec<Candidate> {
    let name = options.module_name();
    let rc = format!(".{name}rc");
    let mut candidates = Vec::with_capacity(7);

    candidates.push(Candidate::new(
        directory.join("package.json"),
        CandidateKind::PackageJson {
            property: options.package_prop().to_owned(),
        },
    ));
    candidates.push(Candidate::new(
        directory.join(&rc),
        CandidateKind::RcPlain {
            strict_json: options.rc_strict_json(),
        },
    ));
    if options.rc_extensions() {
        for (extension, kind) in [
            ("json", CandidateKind::RcJson),
            ("yaml", CandidateKind::RcYaml),
            ("yml", CandidateKind::RcYaml),
            ("js", CandidateKind::RcJs),
        ] {
            candidates.push(Candidate::new(
                directory.join(format!("{rc}.{extension}")),
                kind,
            ));
        }
    }
    candidates.push(Candidate::new(
        directory.join(format!("{name}.config.js")),
        CandidateKind::ConfigJs,
    ));

    candidates
}

/// Builds the single candidate used when an explicit path bypasses the walk.
///
/// An explicit `format` wins; otherwise the extension decides and anything
/// unrecognised is read as YAML, which also accepts JSON.
#[must_use]
pub fn explicit_candidate(path: &Path, format: Option<ConfigFormat>) -> Candidate {
    let format = format.or_else(|| ConfigFormat::from_path(path));
    let kind = match format {
        Some(ConfigFormat::Json) => CandidateKind::RcJson,
        Some(ConfigFormat::Yaml) => CandidateKind::RcYaml,
        Some(ConfigFormat::Js) => CandidateKind::RcJs,
        None => CandidateKind::RcPlain { strict_json: false },
    };
    Candidate::new(path, kind)
}

#[cfg(test)]
mod tests;
