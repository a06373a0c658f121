//! Similarity clustering configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default MinHash seed. Fixed so signatures are reproducible across runs.
pub const DEFAULT_MINHASH_SEED: u64 = 0x5eed_d1ff_c0ff_ee00;

/// Configuration for MinHash file clustering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Estimated Jaccard similarity at or above which two files are grouped (default: 0.6).
    pub similarity_threshold: f64,
    /// Number of MinHash functions per signature (default: 64).
    pub num_hashes: usize,
    /// Seed for the hash-function family.
    pub seed: u64,
    /// Example common paths listed per group (default: 3).
    pub max_example_paths: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            num_hashes: 64,
            seed: DEFAULT_MINHASH_SEED,
            max_example_paths: 3,
        }
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::invalid(
                "clustering.similarity_threshold",
                format!("must be in [0, 1], got {}", self.similarity_threshold),
            ));
        }
        if self.num_hashes == 0 {
            return Err(ConfigError::invalid("clustering.num_hashes", "must be at least 1"));
        }
        Ok(())
    }
}
