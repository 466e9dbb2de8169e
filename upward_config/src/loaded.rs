//! The successful outcome of a search.

use std::path::PathBuf;
use std::sync::Arc;

use figment::Figment;
use figment::providers::Serialized;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::UpwardResult;
use crate::error::UpwardError;

/// Configuration loaded from the first matching candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedConfig {
    /// The parsed configuration. For `package.json` this is the value of the
    /// configured property, not the whole document.
    pub config: Value,
    /// Absolute path of the file the configuration came from.
    pub filepath: PathBuf,
}

impl LoadedConfig {
    /// Pairs a configuration value with the file it came from.
    #[must_use]
    pub fn new(config: Value, filepath: impl Into<PathBuf>) -> Self {
        Self {
            config,
            filepath: filepath.into(),
        }
    }

    /// Returns `true` when the configuration is an empty object or array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.config {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Wraps the configuration in a [`Figment`] so callers can layer their
    /// own providers on top before extracting.
    #[must_use]
    pub fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(&self.config))
    }

    /// Deserializes the configuration into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`UpwardError::Extract`] when the configuration does not match
    /// the shape of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde::Deserialize;
    /// use upward_config::LoadedConfig;
    ///
    /// #[derive(Deserialize)]
    /// struct Settings {
    ///     semi: bool,
    /// }
    ///
    /// let loaded = LoadedConfig::new(serde_json::json!({ "semi": false }), "/repo/.foorc");
    /// let settings: Settings = loaded.extract().expect("shape matches");
    /// assert!(!settings.semi);
    /// ```
    pub fn extract<T: DeserializeOwned>(&self) -> UpwardResult<T> {
        self.figment()
            .extract()
            .map_err(|err| Arc::new(UpwardError::from(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Settings {
        name: String,
        #[serde(default)]
        tabs: Option<u8>,
    }

    #[test]
    fn extract_deserializes_into_typed_settings() -> Result<()> {
        let loaded = LoadedConfig::new(json!({ "name": "demo", "tabs": 4 }), "/r/.foorc");
        let settings: Settings = loaded.extract().map_err(|err| anyhow!("{err}"))?;
        ensure!(
            settings
                == Settings {
                    name: String::from("demo"),
                    tabs: Some(4),
                },
            "unexpected settings {settings:?}"
        );
        Ok(())
    }

    #[test]
    fn extract_reports_shape_mismatches() -> Result<()> {
        let loaded = LoadedConfig::new(json!({ "tabs": 4 }), "/r/.foorc");
        let err = loaded
            .extract::<Settings>()
            .err()
            .ok_or_else(|| anyhow!("missing field must fail"))?;
        ensure!(
            matches!(err.as_ref(), UpwardError::Extract(_)),
            "unexpected error {err}"
        );
        Ok(())
    }

    #[test]
    fn figment_allows_layering_overrides() -> Result<()> {
        let loaded = LoadedConfig::new(json!({ "name": "file" }), "/r/.foorc");
        let settings: Settings = loaded
            .figment()
            .merge(Serialized::defaults(json!({ "name": "override" })))
            .extract()?;
        ensure!(settings.name == "override", "override must win");
        Ok(())
    }

    #[rstest]
    #[case(json!({}), true)]
    #[case(json!([]), true)]
    #[case(json!({ "a": 1 }), false)]
    #[case(json!(0), false)]
    fn emptiness_follows_the_container(#[case] config: Value, #[case] expected: bool) {
        assert_eq!(LoadedConfig::new(config, "/r/x").is_empty(), expected);
    }
}
