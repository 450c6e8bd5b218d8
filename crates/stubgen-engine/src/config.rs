//! Generator configuration
//!
//! Options are read from a `stubgen.toml` file; every field has a default so
//! an empty file (or no file at all) is valid:
//!
//! ```toml
//! namespace = "Stubs"
//! wrapper_suffix = "Wrapper"
//! source_accessor = "__Source"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "stubgen.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML or has wrong field types
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value is not usable
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// What is wrong
        reason: String,
    },
}

/// Options controlling the generated wrapper source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Namespace wrapping the generated class
    pub namespace: String,
    /// Appended to the wrapped type name to form the wrapper name
    pub wrapper_suffix: String,
    /// Name of the read-only property returning the wrapped instance
    pub source_accessor: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            namespace: "Stubs".to_string(),
            wrapper_suffix: "Wrapper".to_string(),
            source_accessor: "__Source".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let options: GeneratorOptions = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("loaded generator options from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Wrapper class name for a wrapped type.
    pub fn wrapper_name(&self, type_name: &str) -> String {
        format!("{}{}", type_name, self.wrapper_suffix)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let identifier = |field: &'static str, value: &str| {
            if crate::descriptor::is_identifier(value)
                && !crate::parser::token::is_keyword(value)
            {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("'{}' is not a valid identifier", value),
                })
            }
        };
        identifier("namespace", &self.namespace)?;
        identifier("source_accessor", &self.source_accessor)?;
        if !self.wrapper_suffix.is_empty() {
            identifier("wrapper_suffix", &self.wrapper_suffix)?;
        }
        Ok(())
    }
}
