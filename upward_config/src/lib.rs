//! Upward configuration discovery.
//!
//! `upward_config` finds a tool's configuration the way JavaScript tooling
//! users expect: starting from a directory, it checks a fixed list of
//! candidate files (a key in `package.json`, `.{name}rc`, optional
//! `.{name}rc.{json,yaml,yml,js}` and `{name}.config.js`) and walks towards
//! the filesystem root until one of them holds configuration.
//!
//! The first existing candidate that yields a value wins. A candidate that
//! exists but fails to parse stops the search with a classified
//! [`UpwardError`]; later candidates are never tried.
//!
//! ```rust,no_run
//! use upward_config::{ConfigExplorer, SearchOptions};
//!
//! # fn main() -> upward_config::UpwardResult<()> {
//! let explorer = ConfigExplorer::new(SearchOptions::builder("prettier").build());
//! if let Some(found) = explorer.search_sync(None)? {
//!     println!("{}: {}", found.filepath.display(), found.config);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The algorithm lives in [`engine::Search`], a state machine that performs
//! no I/O itself; [`ConfigExplorer::search_sync`] and
//! [`ConfigExplorer::search`] drive it with blocking and async filesystems
//! respectively.

use std::sync::Arc;

mod candidates;
pub mod engine;
mod error;
mod explorer;
mod format;
mod fs;
mod loaded;
mod options;
pub mod walk;

pub use candidates::{Candidate, CandidateKind, candidates_for, explicit_candidate};
pub use error::{Location, ParseErrorKind, UpwardError};
pub use explorer::ConfigExplorer;
#[cfg(feature = "js")]
pub use format::StaticModuleLoader;
pub use format::{DisabledModuleLoader, ModuleError, ModuleLoader, default_module_loader, dispatch};
pub use fs::{AsyncFileSystem, FileSystem, FsCall, MemoryFileSystem, NativeFileSystem};
pub use loaded::LoadedConfig;
pub use options::{ConfigFormat, SearchOptions, SearchOptionsBuilder, UnknownFormat};
pub use walk::AncestorWalk;

/// Result type used throughout the crate. Errors are shared so cached and
/// repeated outcomes can hand out the same failure.
pub type UpwardResult<T> = Result<T, Arc<UpwardError>>;
