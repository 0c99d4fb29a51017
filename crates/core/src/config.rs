//! Statement rendering configuration.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Options that shape generated statement text.
///
/// Config never affects the extracted schema, so one cached schema serves
/// facades built with different configs.
///
/// ```rust
/// use tillage_core::Config;
///
/// let config = Config::from_toml_str(
///     r#"
///     placeholder = "%s"
///     identity_suffix = "AUTO_INCREMENT"
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.placeholder, "%s");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Positional parameter marker.
    pub placeholder: String,
    /// Appended after `PRIMARY KEY` on the identity column when non-empty.
    pub identity_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder: "?".into(),
            identity_suffix: String::new(),
        }
    }
}

impl Config {
    /// Parses a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Sets the parameter marker.
    pub fn placeholder(mut self, marker: impl Into<String>) -> Self {
        self.placeholder = marker.into();
        self
    }

    /// Sets the identity column suffix.
    pub fn identity_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.identity_suffix = suffix.into();
        self
    }

    /// Validates the config.
    pub fn check(&self) -> Result<()> {
        if self.placeholder.trim().is_empty() {
            return Err(Error::config("placeholder cannot be empty"));
        }
        Ok(())
    }
}
