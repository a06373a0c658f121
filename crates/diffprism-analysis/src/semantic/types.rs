//! Semantic group types.

use std::collections::BTreeSet;

use diffprism_core::Difference;
use serde::{Deserialize, Serialize};

/// A confidence-scored, themed bucket of differences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticGroup {
    pub name: String,
    pub description: String,
    /// Derived from the related-property and file counts (0 to 100).
    pub confidence_level: u8,
    pub differences: Vec<Difference>,
    pub affected_files: BTreeSet<String>,
    /// Normalized paths of the grouped differences.
    pub related_properties: BTreeSet<String>,
}

impl SemanticGroup {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            confidence_level: 0,
            differences: Vec::new(),
            affected_files: BTreeSet::new(),
            related_properties: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, diff: &Difference, file: &str, normalized: &str) {
        self.differences.push(diff.clone());
        if !self.affected_files.contains(file) {
            self.affected_files.insert(file.to_string());
        }
        if !self.related_properties.contains(normalized) {
            self.related_properties.insert(normalized.to_string());
        }
    }

    /// Append another partial group of the same theme after this one.
    pub fn absorb(&mut self, other: SemanticGroup) {
        self.differences.extend(other.differences);
        self.affected_files.extend(other.affected_files);
        self.related_properties.extend(other.related_properties);
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// `min(100, 50 + 5·min(10, related) + 5·min(5, files))`.
    pub fn confidence_for(related_properties: usize, affected_files: usize) -> u8 {
        let score = 50 + 5 * related_properties.min(10) + 5 * affected_files.min(5);
        score.min(100) as u8
    }

    pub(crate) fn refresh_confidence(&mut self) {
        self.confidence_level =
            Self::confidence_for(self.related_properties.len(), self.affected_files.len());
    }
}

/// Output of the semantic grouper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticDifferenceAnalysis {
    /// Non-empty groups, by confidence desc then size desc.
    pub groups: Vec<SemanticGroup>,
    pub total_differences: usize,
    pub categorized_differences: usize,
    pub uncategorized_differences: usize,
    /// `categorized / total`, 0.0 when there are no differences.
    pub categorized_ratio: f64,
}

impl SemanticDifferenceAnalysis {
    pub fn group(&self, name: &str) -> Option<&SemanticGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}
