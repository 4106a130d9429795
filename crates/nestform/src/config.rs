//! Form configuration.

use serde::Deserialize;

use crate::error::FormError;

/// Tunables for a [`Form`](crate::Form).
///
/// ```toml
/// rails_attributes = true
/// attribute_suffix = "_attributes"
/// recently_successful_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Rename nested keys with `attribute_suffix` before sending.
    pub rails_attributes: bool,
    pub attribute_suffix: String,
    /// How long `recently_successful` stays set after a success.
    pub recently_successful_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            rails_attributes: false,
            attribute_suffix: nestform_path::DEFAULT_SUFFIX.to_string(),
            recently_successful_ms: 2000,
        }
    }
}

impl FormConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, FormError> {
        toml::from_str(source).map_err(|e| FormError::Config(e.to_string()))
    }
}
