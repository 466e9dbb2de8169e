//! Immutable search options and the format override for explicit paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod builder;

pub use builder::SearchOptionsBuilder;

/// Options fixed for the lifetime of a [`ConfigExplorer`](crate::ConfigExplorer).
///
/// Construct with [`SearchOptions::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub(crate) module_name: String,
    pub(crate) start_dir: Option<PathBuf>,
    pub(crate) stop_dir: Option<PathBuf>,
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) format: Option<ConfigFormat>,
    pub(crate) rc_extensions: bool,
    pub(crate) rc_strict_json: bool,
    pub(crate) package_prop: String,
}

impl SearchOptions {
    /// Creates a builder for `module_name`.
    #[must_use]
    pub fn builder(module_name: impl Into<String>) -> SearchOptionsBuilder {
        SearchOptionsBuilder::new(module_name)
    }

    /// Name used to derive candidate file names.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Directory the search starts from when the caller does not pass one.
    #[must_use]
    pub fn start_dir(&self) -> Option<&Path> {
        self.start_dir.as_deref()
    }

    /// Highest directory the search may inspect; `None` means the root.
    #[must_use]
    pub fn stop_dir(&self) -> Option<&Path> {
        self.stop_dir.as_deref()
    }

    /// Explicit configuration file that bypasses the directory walk.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Format override for explicit paths.
    #[must_use]
    pub const fn format(&self) -> Option<ConfigFormat> {
        self.format
    }

    /// Whether `.{name}rc.{json,yaml,yml,js}` are searched.
    #[must_use]
    pub const fn rc_extensions(&self) -> bool {
        self.rc_extensions
    }

    /// Whether the extensionless rc file is parsed as strict JSON.
    #[must_use]
    pub const fn rc_strict_json(&self) -> bool {
        self.rc_strict_json
    }

    /// Property read from `package.json`.
    #[must_use]
    pub fn package_prop(&self) -> &str {
        &self.package_prop
    }
}

/// Format of an explicitly named configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// Strict JSON.
    Json,
    /// YAML (JSON is accepted as a subset).
    Yaml,
    /// A JavaScript module.
    Js,
}

impl ConfigFormat {
    /// Infers the format from the extension of `path`, ignoring case.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "js" | "cjs" | "mjs" => Some(Self::Js),
            _ => None,
        }
    }

    /// Lower-case name of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Js => "js",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ConfigFormat`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown configuration format '{0}'; expected json, yaml or js")]
pub struct UnknownFormat(pub String);

impl FromStr for ConfigFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "js" | "javascript" => Ok(Self::Js),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}
