//! Generator configuration.
//!
//! The config is parsed from JSON text handed in by the driving script; every field
//! has a default so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Author recorded in the `@author` tag when a request does not name one.
pub const DEFAULT_AUTHOR: &str = "Mike Hamburg";

/// Settings shared by every template registration of a [`crate::Generator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Author used for requests without an explicit author.
    pub default_author: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_author: DEFAULT_AUTHOR.into(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(GenError::ConfigParse)
    }
}
