//! Routing raw candidate content to the parser for its kind.
//!
//! Parsing is always synchronous. A candidate either yields configuration,
//! yields nothing (an absent value, treated by the engine like a missing
//! file), or fails with a classified [`UpwardError::Parse`].

mod json;
mod module;
mod package;
mod yaml;

#[cfg(feature = "js")]
mod js;

use std::path::Path;

use serde_json::Value;

use crate::UpwardResult;
use crate::candidates::{Candidate, CandidateKind};
use crate::error::UpwardError;

#[cfg(feature = "js")]
pub use js::StaticModuleLoader;
pub use module::{DisabledModuleLoader, ModuleError, ModuleLoader, default_module_loader};

/// Parses `text` read from `candidate` into a configuration value.
///
/// Returns `Ok(None)` when the content holds no usable configuration:
/// whitespace-only files, `null` documents, `package.json` without the
/// configured property, and modules exporting `undefined` or `null`.
///
/// # Errors
///
/// Returns [`UpwardError::Parse`] classified by the parser that rejected the
/// content. No other parser is tried.
pub fn dispatch(
    candidate: &Candidate,
    text: &str,
    loader: &dyn ModuleLoader,
) -> UpwardResult<Option<Value>> {
    let path = candidate.path.as_path();
    let content = text.strip_prefix('\u{feff}').unwrap_or(text);
    if content.trim().is_empty() {
        return Ok(None);
    }
    match &candidate.kind {
        CandidateKind::PackageJson { property } => {
            let document = json::parse(path, content)?;
            Ok(package::extract_property(&document, property))
        }
        CandidateKind::RcPlain { strict_json: true } | CandidateKind::RcJson => {
            json::parse(path, content).map(present)
        }
        CandidateKind::RcPlain { strict_json: false } | CandidateKind::RcYaml => {
            yaml::parse(path, content).map(present)
        }
        CandidateKind::RcJs | CandidateKind::ConfigJs => load_module(path, content, loader),
    }
}

fn load_module(path: &Path, source: &str, loader: &dyn ModuleLoader) -> UpwardResult<Option<Value>> {
    loader
        .load(path, source)
        .map(|export| export.and_then(present))
        .map_err(|err| err.into_upward(path))
}

fn present(value: Value) -> Option<Value> {
    (!value.is_null()).then_some(value)
}
