//! Builder for [`SearchOptions`].
//!
//! The builder collects the module name, directory bounds and format flags
//! before freezing them into an immutable [`SearchOptions`].

use std::path::PathBuf;

use super::{ConfigFormat, SearchOptions};

/// Builder for [`SearchOptions`].
///
/// # Examples
///
/// ```rust,no_run
/// use upward_config::{ConfigExplorer, SearchOptions};
///
/// # fn run() -> upward_config::UpwardResult<()> {
/// let options = SearchOptions::builder("prettier")
///     .rc_extensions(true)
///     .stop_at_home()
///     .build();
///
/// if let Some(found) = ConfigExplorer::new(options).search_sync(None)? {
///     println!("loaded {}", found.filepath.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SearchOptionsBuilder {
    module_name: String,
    start_dir: Option<PathBuf>,
    stop_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: Option<ConfigFormat>,
    rc_extensions: bool,
    rc_strict_json: bool,
    package_prop: Option<String>,
}

impl SearchOptionsBuilder {
    /// Creates a builder for `module_name` with every flag disabled.
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            start_dir: None,
            stop_dir: None,
            config_path: None,
            format: None,
            rc_extensions: false,
            rc_strict_json: false,
            package_prop: None,
        }
    }

    /// Sets the default start directory; the current directory otherwise.
    #[must_use]
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Sets the highest directory inspected; the filesystem root otherwise.
    #[must_use]
    pub fn stop_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stop_dir = Some(dir.into());
        self
    }

    /// Stops the search at the user's home directory when it can be found.
    #[must_use]
    pub fn stop_at_home(mut self) -> Self {
        if let Some(home) = dirs::home_dir() {
            self.stop_dir = Some(home);
        }
        self
    }

    /// Loads exactly `path` instead of walking directories.
    #[must_use]
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Forces the format of explicitly loaded files.
    #[must_use]
    pub fn format(mut self, format: ConfigFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Enables the `.{name}rc.{json,yaml,yml,js}` candidates.
    #[must_use]
    pub fn rc_extensions(mut self, enabled: bool) -> Self {
        self.rc_extensions = enabled;
        self
    }

    /// Parses the extensionless rc file as strict JSON.
    #[must_use]
    pub fn rc_strict_json(mut self, enabled: bool) -> Self {
        self.rc_strict_json = enabled;
        self
    }

    /// Overrides the `package.json` property; defaults to the module name.
    #[must_use]
    pub fn package_prop(mut self, prop: impl Into<String>) -> Self {
        self.package_prop = Some(prop.into());
        self
    }

    /// Finalises the builder.
    #[must_use]
    pub fn build(self) -> SearchOptions {
        let package_prop = self
            .package_prop
            .unwrap_or_else(|| self.module_name.clone());
        SearchOptions {
            module_name: self.module_name,
            start_dir: self.start_dir,
            stop_dir: self.stop_dir,
            config_path: self.config_path,
            format: self.format,
            rc_extensions: self.rc_extensions,
            rc_strict_json: self.rc_strict_json,
            package_prop,
        }
    }
}
