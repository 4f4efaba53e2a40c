//! Code generator configuration
//!
//! The instruction buffer has a fixed upper bound decided before compilation starts.
//! The bound is read from TOML so that programs producing a lot of unrolled code can
//! raise it without a rebuild:
//!
//! ```toml
//! max_quads = 2000
//! ```

use crate::codegen::error::CodegenError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default instruction buffer capacity
pub const DEFAULT_MAX_QUADS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Maximum number of quads a compilation unit may emit
    pub max_quads: usize,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            max_quads: DEFAULT_MAX_QUADS,
        }
    }
}

impl CodegenConfig {
    pub fn with_max_quads(max_quads: usize) -> Self {
        Self { max_quads }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, CodegenError> {
        let config: CodegenConfig =
            toml::from_str(text).map_err(|e| CodegenError::Config(e.to_string()))?;
        config.validate()?;
        log::debug!("Loaded codegen config: max_quads={}", config.max_quads);
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CodegenError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            CodegenError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.max_quads == 0 {
            return Err(CodegenError::Config(
                "max_quads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
