//! The module-loading capability used for `.js` candidates.
//!
//! Evaluating a configuration module is delegated to a [`ModuleLoader`]
//! supplied by the caller. The search only needs the exported value, or a
//! classified failure.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Location, ParseErrorKind, UpwardError};

/// Evaluates a JavaScript configuration module.
pub trait ModuleLoader: Send + Sync {
    /// Evaluates `source`, read from `path`, and returns its export.
    ///
    /// `Ok(None)` means the module exported `undefined`.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Syntax`] when the source does not parse and
    /// [`ModuleError::Evaluation`] when no export value can be produced.
    fn load(&self, path: &Path, source: &str) -> Result<Option<Value>, ModuleError>;
}

impl<F> ModuleLoader for F
where
    F: Fn(&Path, &str) -> Result<Option<Value>, ModuleError> + Send + Sync,
{
    fn load(&self, path: &Path, source: &str) -> Result<Option<Value>, ModuleError> {
        self(path, source)
    }
}

/// Failure reported by a [`ModuleLoader`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    /// The module source is not valid JavaScript.
    #[error("{message}")]
    Syntax {
        /// Parser message.
        message: String,
        /// Position of the first syntax error, when known.
        location: Option<Location>,
    },
    /// The module parsed but its export could not be produced.
    #[error("{message}")]
    Evaluation {
        /// Reason evaluation failed.
        message: String,
    },
}

impl ModuleError {
    /// Creates an evaluation failure.
    #[must_use]
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    pub(crate) fn into_upward(self, path: &Path) -> Arc<UpwardError> {
        match self {
            Self::Syntax { message, location } => {
                UpwardError::parse(path, ParseErrorKind::JsSyntax, message, location)
            }
            Self::Evaluation { message } => {
                UpwardError::parse(path, ParseErrorKind::JsEvaluation, message, None)
            }
        }
    }
}

/// Loader that rejects every module.
///
/// Used when the crate is built without the `js` feature and no loader was
/// supplied, so a `.js` candidate still stops the search with a classified
/// error instead of being skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledModuleLoader;

impl ModuleLoader for DisabledModuleLoader {
    fn load(&self, path: &Path, _source: &str) -> Result<Option<Value>, ModuleError> {
        Err(ModuleError::evaluation(format!(
            "cannot evaluate '{}': JavaScript module loading is disabled",
            path.display()
        )))
    }
}

/// The loader used when none is configured.
///
/// This is [`StaticModuleLoader`](crate::StaticModuleLoader) with the `js`
/// feature and [`DisabledModuleLoader`] without it.
#[must_use]
pub fn default_module_loader() -> Arc<dyn ModuleLoader> {
    #[cfg(feature = "js")]
    {
        Arc::new(super::StaticModuleLoader::new())
    }
    #[cfg(not(feature = "js"))]
    {
        Arc::new(DisabledModuleLoader)
    }
}
