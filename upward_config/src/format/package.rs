//! Extraction of the configuration property from `package.json`.

use serde_json::Value;

/// Looks up `property` in `document`.
///
/// The property is matched literally first, so keys containing dots keep
/// working; otherwise it is followed as a dotted path. Missing and `null`
/// values are absent.
pub(super) fn extract_property(document: &Value, property: &str) -> Option<Value> {
    let found = match document.get(property) {
        Some(value) => value,
        None => property
            .split('.')
            .try_fold(document, |current, segment| current.get(segment))?,
    };
    (!found.is_null()).then(|| found.clone())
}
