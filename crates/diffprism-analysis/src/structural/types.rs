//! Core types for structural pattern mining.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use diffprism_core::Difference;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::categorize::DifferenceCategory;

/// Inline capacity for example differences; matches the default example limit.
pub type ExampleList = SmallVec<[Difference; 3]>;

/// An aggregated, scored difference shape recurring across file pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralPattern {
    /// Pattern signature; unique within one analysis.
    pub key: String,
    /// Normalized path the pattern is about (collection path for order patterns).
    pub path: String,
    pub parent_path: String,
    pub subject_property: String,
    pub category: DifferenceCategory,
    /// Recurring `(old, new)` pair for value-transition patterns.
    pub value_pair: Option<(String, String)>,
    pub occurrence_count: u32,
    /// Always equal to `affected_files.len()`.
    pub file_count: u32,
    pub affected_files: BTreeSet<String>,
    /// Bounded sample of matching differences, in insertion order.
    pub examples: ExampleList,
    /// Percentage of files-with-differences exhibiting the pattern (0 to 100).
    pub consistency: f64,
    pub is_collection_element: bool,
    pub is_critical: bool,
    pub description: String,
    pub recommended_action: String,
}

impl StructuralPattern {
    /// Fold one more matching difference into the pattern.
    pub fn record(&mut self, diff: &Difference, file: &str, example_limit: usize) {
        self.occurrence_count += 1;
        if !self.affected_files.contains(file) {
            self.affected_files.insert(file.to_string());
            self.file_count = self.affected_files.len() as u32;
        }
        if self.examples.len() < example_limit {
            self.examples.push(diff.clone());
        }
    }

    /// Fold another partial aggregate of the same signature into this one.
    pub fn absorb(&mut self, other: StructuralPattern, example_limit: usize) {
        self.occurrence_count += other.occurrence_count;
        self.affected_files.extend(other.affected_files);
        self.file_count = self.affected_files.len() as u32;
        let room = example_limit.saturating_sub(self.examples.len());
        self.examples.extend(other.examples.into_iter().take(room));
    }

    /// Which result bucket the pattern belongs to.
    pub fn bucket(&self) -> PatternBucket {
        PatternBucket::for_pattern(self)
    }
}

/// Named result buckets. Every pattern lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternBucket {
    CriticalMissing,
    MissingProperties,
    MissingCollectionElements,
    OrderDifferences,
    ConsistentValueDifferences,
    GeneralValueDifferences,
    Uncategorized,
}

impl PatternBucket {
    pub const ALL: [PatternBucket; 7] = [
        Self::CriticalMissing,
        Self::MissingProperties,
        Self::MissingCollectionElements,
        Self::OrderDifferences,
        Self::ConsistentValueDifferences,
        Self::GeneralValueDifferences,
        Self::Uncategorized,
    ];

    /// Route a pattern. The critical flag takes priority over its category.
    pub fn for_pattern(pattern: &StructuralPattern) -> Self {
        if pattern.is_critical {
            return Self::CriticalMissing;
        }
        match pattern.category {
            DifferenceCategory::PropertyMissing
            | DifferenceCategory::NullValueChange
            | DifferenceCategory::ItemAdded
            | DifferenceCategory::ItemRemoved => Self::MissingProperties,
            DifferenceCategory::CollectionElementMissing => Self::MissingCollectionElements,
            DifferenceCategory::ElementOrderChanged => Self::OrderDifferences,
            DifferenceCategory::TextChanged
            | DifferenceCategory::NumericChanged
            | DifferenceCategory::DateTimeChanged
            | DifferenceCategory::BooleanChanged
            | DifferenceCategory::CollectionItemChanged
            | DifferenceCategory::ValueChanged => Self::ConsistentValueDifferences,
            DifferenceCategory::GeneralValueChanged => Self::GeneralValueDifferences,
            DifferenceCategory::UncategorizedDifference => Self::Uncategorized,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CriticalMissing => "critical_missing",
            Self::MissingProperties => "missing_properties",
            Self::MissingCollectionElements => "missing_collection_elements",
            Self::OrderDifferences => "order_differences",
            Self::ConsistentValueDifferences => "consistent_value_differences",
            Self::GeneralValueDifferences => "general_value_differences",
            Self::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for PatternBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dominant difference kind of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileClassification {
    Value,
    Missing,
    Order,
    Mixed,
    Uncategorized,
}

/// Per-file tally of difference kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileKindCounts {
    pub missing: u32,
    pub order: u32,
    pub value: u32,
    pub other: u32,
}

impl FileKindCounts {
    pub fn total(&self) -> u32 {
        self.missing + self.order + self.value + self.other
    }
}

/// Classification of one file with its underlying counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileClassificationDetail {
    pub classification: FileClassification,
    pub counts: FileKindCounts,
}

/// Partition of files-with-differences by dominant difference kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileClassificationBreakdown {
    pub value_files: Vec<String>,
    pub missing_files: Vec<String>,
    pub order_files: Vec<String>,
    pub mixed_files: Vec<String>,
    pub uncategorized_files: Vec<String>,
    pub per_file: BTreeMap<String, FileClassificationDetail>,
}

impl FileClassificationBreakdown {
    pub fn files(&self, classification: FileClassification) -> &[String] {
        match classification {
            FileClassification::Value => &self.value_files,
            FileClassification::Missing => &self.missing_files,
            FileClassification::Order => &self.order_files,
            FileClassification::Mixed => &self.mixed_files,
            FileClassification::Uncategorized => &self.uncategorized_files,
        }
    }

    pub fn classification_of(&self, file: &str) -> Option<FileClassification> {
        self.per_file.get(file).map(|d| d.classification)
    }
}

/// Headline numbers of a structural analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralSummary {
    pub total_file_pairs: usize,
    pub files_with_differences: usize,
    pub total_differences: usize,
    pub pattern_count: usize,
    pub critical_pattern_count: usize,
    pub uncategorized_differences: u32,
    pub bucket_counts: BTreeMap<PatternBucket, usize>,
}

/// Output of the structural pattern miner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralAnalysisResult {
    pub summary: StructuralSummary,
    pub critical_missing: Vec<StructuralPattern>,
    pub missing_properties: Vec<StructuralPattern>,
    pub missing_collection_elements: Vec<StructuralPattern>,
    pub order_differences: Vec<StructuralPattern>,
    pub consistent_value_differences: Vec<StructuralPattern>,
    pub general_value_differences: Vec<StructuralPattern>,
    pub uncategorized: Vec<StructuralPattern>,
    pub file_classification: FileClassificationBreakdown,
    /// Files with differences that no pattern accounts for.
    pub unaccounted_files: Vec<String>,
}

impl StructuralAnalysisResult {
    pub fn bucket(&self, bucket: PatternBucket) -> &[StructuralPattern] {
        match bucket {
            PatternBucket::CriticalMissing => &self.critical_missing,
            PatternBucket::MissingProperties => &self.missing_properties,
            PatternBucket::MissingCollectionElements => &self.missing_collection_elements,
            PatternBucket::OrderDifferences => &self.order_differences,
            PatternBucket::ConsistentValueDifferences => &self.consistent_value_differences,
            PatternBucket::GeneralValueDifferences => &self.general_value_differences,
            PatternBucket::Uncategorized => &self.uncategorized,
        }
    }

    pub(crate) fn bucket_mut(&mut self, bucket: PatternBucket) -> &mut Vec<StructuralPattern> {
        match bucket {
            PatternBucket::CriticalMissing => &mut self.critical_missing,
            PatternBucket::MissingProperties => &mut self.missing_properties,
            PatternBucket::MissingCollectionElements => &mut self.missing_collection_elements,
            PatternBucket::OrderDifferences => &mut self.order_differences,
            PatternBucket::ConsistentValueDifferences => &mut self.consistent_value_differences,
            PatternBucket::GeneralValueDifferences => &mut self.general_value_differences,
            PatternBucket::Uncategorized => &mut self.uncategorized,
        }
    }

    /// Every pattern across all buckets.
    pub fn all_patterns(&self) -> impl Iterator<Item = &StructuralPattern> {
        PatternBucket::ALL.into_iter().flat_map(move |b| self.bucket(b).iter())
    }

    /// Look a pattern up by signature.
    pub fn pattern(&self, key: &str) -> Option<&StructuralPattern> {
        self.all_patterns().find(|p| p.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.all_patterns().next().is_none()
    }
}
