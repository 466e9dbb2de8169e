//! YAML parsing backed by `serde-saphyr`.
//!
//! YAML 1.2 is a superset of JSON, so this parser also serves rc files
//! written as plain JSON. Booleans are strict: `yes` stays a string.

use std::path::Path;

use serde_json::Value;
use serde_saphyr::Options;

use crate::UpwardResult;
use crate::error::{ParseErrorKind, UpwardError};

pub(super) fn parse(path: &Path, content: &str) -> UpwardResult<Value> {
    serde_saphyr::from_str_with_options(
        content,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|err| UpwardError::parse(path, ParseErrorKind::Yaml, err.to_string(), None))
}
