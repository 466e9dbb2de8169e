//! A module loader that evaluates literal exports without a JavaScript
//! runtime.
//!
//! Sources are parsed with `oxc`. Any parse diagnostic is a syntax error.
//! Top-level statements are then interpreted statically: `const`/`let`/`var`
//! bindings with literal initialisers, `module.exports = ...`,
//! `exports.key = ...`, `module.exports.key = ...` and `export default ...`.
//! Expressions are limited to JSON-like literals, template strings without
//! substitutions, unary `-`/`+`/`!`, `undefined`, references to earlier
//! bindings and object spreads of known objects. Anything else is an
//! evaluation error rather than a silently skipped export.

mod eval;

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde_json::Value;

use super::module::{ModuleError, ModuleLoader};

/// Static evaluator for JavaScript configuration modules.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use upward_config::{ModuleLoader, StaticModuleLoader};
///
/// let loader = StaticModuleLoader::new();
/// let export = loader
///     .load(Path::new("foo.config.js"), "module.exports = { semi: false };")
///     .expect("literal export evaluates");
/// assert_eq!(export, Some(serde_json::json!({ "semi": false })));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticModuleLoader;

impl StaticModuleLoader {
    /// Creates the loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&self, _path: &Path, source: &str) -> Result<Option<Value>, ModuleError> {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true);
        let ret = Parser::new(&allocator, source, source_type).parse();

        if !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            tracing::trace!(errors = ret.errors.len(), "module failed to parse");
            return Err(ModuleError::Syntax {
                message,
                location: None,
            });
        }
        if ret.panicked {
            return Err(ModuleError::Syntax {
                message: String::from("parser aborted"),
                location: None,
            });
        }

        eval::Evaluator::default().run(&ret.program)
    }
}
