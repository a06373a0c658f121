//! Semantic grouper configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// A named document region recognised by path substrings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSection {
    /// Group name used for differences in this section.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Case-insensitive path substrings identifying the section.
    pub keywords: Vec<String>,
}

impl DocumentSection {
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for the semantic grouper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticConfig {
    /// Sections tried, in order, after the named predicates.
    pub sections: Vec<DocumentSection>,
    /// Numeric distance under which two element values look reordered. Default: 10.
    pub order_numeric_tolerance: f64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                DocumentSection::new(
                    "Header Changes",
                    "Differences in document headers and envelopes",
                    ["Header", "Envelope"],
                ),
                DocumentSection::new(
                    "Metadata Changes",
                    "Differences in metadata and paging information",
                    ["Metadata", "Paging", "Pagination"],
                ),
            ],
            order_numeric_tolerance: 10.0,
        }
    }
}

impl SemanticConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.order_numeric_tolerance.is_finite() || self.order_numeric_tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "semantic.order_numeric_tolerance",
                format!("must be a non-negative number, got {}", self.order_numeric_tolerance),
            ));
        }
        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(ConfigError::invalid("semantic.sections.name", "must not be blank"));
            }
            if section.keywords.is_empty() || section.keywords.iter().any(|k| k.is_empty()) {
                return Err(ConfigError::invalid(
                    "semantic.sections.keywords",
                    format!("section `{}` needs at least one non-empty keyword", section.name),
                ));
            }
        }
        Ok(())
    }
}
