//! Strict JSON parsing with position reporting.

use std::path::Path;

use serde_json::Value;

use crate::UpwardResult;
use crate::error::{Location, ParseErrorKind, UpwardError};

pub(super) fn parse(path: &Path, content: &str) -> UpwardResult<Value> {
    serde_json::from_str(content).map_err(|err| {
        let location = (err.line() > 0).then(|| Location {
            line: err.line(),
            column: err.column(),
        });
        UpwardError::parse(path, ParseErrorKind::Json, err.to_string(), location)
    })
}
