//! Command-line interface definitions for `upward-config`.

use camino::Utf8PathBuf;
use clap::Parser;
use upward_config::{ConfigFormat, SearchOptions};

/// Parsed CLI arguments for `upward-config`.
#[derive(Debug, Parser)]
#[command(name = "upward-config")]
#[command(about = "Find a tool's configuration by searching upward from a directory")]
#[command(version)]
pub struct Args {
    /// Module name used to derive candidate file names (`.{name}rc`, ...).
    pub module: String,
    /// Directory to start from; defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub start_dir: Option<Utf8PathBuf>,
    /// Highest directory to inspect; defaults to the filesystem root.
    #[arg(long, value_name = "DIR", conflicts_with = "stop_at_home")]
    pub stop_dir: Option<Utf8PathBuf>,
    /// Stop at the user's home directory.
    #[arg(long)]
    pub stop_at_home: bool,
    /// Load this file instead of searching.
    #[arg(long = "config", env = "UPWARD_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<Utf8PathBuf>,
    /// Format of the `--config` file when its extension is ambiguous.
    #[arg(long, value_name = "json|yaml|js", requires = "config_path")]
    pub format: Option<ConfigFormat>,
    /// Property read from `package.json`; defaults to the module name.
    #[arg(long, value_name = "PROP")]
    pub package_prop: Option<String>,
    /// Also search `.{name}rc.json`, `.yaml`, `.yml` and `.js`.
    #[arg(long)]
    pub rc_extensions: bool,
    /// Parse the extensionless rc file as strict JSON.
    #[arg(long)]
    pub rc_strict_json: bool,
    /// Use blocking filesystem calls instead of the async driver.
    #[arg(long)]
    pub blocking: bool,
    /// Exit with status 1 when no configuration is found.
    #[arg(long)]
    pub require: bool,
}

impl Args {
    /// Builds the search options these arguments describe.
    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        let mut builder = SearchOptions::builder(&self.module)
            .rc_extensions(self.rc_extensions)
            .rc_strict_json(self.rc_strict_json);
        if let Some(dir) = &self.start_dir {
            builder = builder.start_dir(dir);
        }
        if self.stop_at_home {
            builder = builder.stop_at_home();
        }
        if let Some(dir) = &self.stop_dir {
            builder = builder.stop_dir(dir);
        }
        if let Some(path) = &self.config_path {
            builder = builder.config_path(path);
        }
        if let Some(format) = self.format {
            builder = builder.format(format);
        }
        if let Some(prop) = &self.package_prop {
            builder = builder.package_prop(prop);
        }
        builder.build()
    }
}
