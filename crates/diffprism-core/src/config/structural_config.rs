//! Structural pattern miner configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Configuration for the structural pattern miner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StructuralConfig {
    /// Property names whose absence is always reported as critical.
    /// Matched case-insensitively against the last path segment or as a path substring.
    pub critical_properties: Vec<String>,
    /// Collection-name suffixes naming a single entity. A collection ending in one of
    /// these and touched at one index or fewer never yields an order pattern.
    pub order_exclusion_suffixes: Vec<String>,
    /// Maximum example differences kept per pattern. Default: 3.
    pub example_limit: usize,
    /// Share of a file's differences a kind must exceed to count as significant. Default: 0.2.
    pub significance_threshold: f64,
    /// Numeric distance under which two values look like a reorder. Default: 10.
    pub order_numeric_tolerance: f64,
}

impl Default for StructuralConfig {
    fn default() -> Self {
        Self {
            critical_properties: Vec::new(),
            order_exclusion_suffixes: Vec::new(),
            example_limit: 3,
            significance_threshold: 0.2,
            order_numeric_tolerance: 10.0,
        }
    }
}

impl StructuralConfig {
    pub fn with_critical_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.critical_properties = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_order_exclusion_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_exclusion_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.example_limit == 0 {
            return Err(ConfigError::invalid(
                "structural.example_limit",
                "must be at least 1",
            ));
        }
        if !(self.significance_threshold > 0.0 && self.significance_threshold < 1.0) {
            return Err(ConfigError::invalid(
                "structural.significance_threshold",
                format!("must be in (0, 1), got {}", self.significance_threshold),
            ));
        }
        if !self.order_numeric_tolerance.is_finite() || self.order_numeric_tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "structural.order_numeric_tolerance",
                format!("must be a non-negative number, got {}", self.order_numeric_tolerance),
            ));
        }
        if self.critical_properties.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "structural.critical_properties",
                "entries must not be blank",
            ));
        }
        Ok(())
    }
}
