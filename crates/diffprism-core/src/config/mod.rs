pub mod clustering_config;
pub mod semantic_config;
pub mod structural_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use clustering_config::ClusteringConfig;
pub use semantic_config::{DocumentSection, SemanticConfig};
pub use structural_config::StructuralConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub structural: StructuralConfig,
    pub semantic: SemanticConfig,
    pub clustering: ClusteringConfig,
}

impl AnalysisConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate config from a TOML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), "analysis config loaded");
        Ok(config)
    }

    /// Check every subsystem config for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.structural.validate()?;
        self.semantic.validate()?;
        self.clustering.validate()
    }
}
