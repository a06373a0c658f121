//! Pattern accumulator, an arena of patterns keyed by signature.
//!
//! Patterns only ever grow: `upsert` folds a matching difference in, `merge`
//! combines two partial accumulators. Counter sums and set unions are
//! commutative; example lists keep the left operand's examples first.

use std::collections::BTreeSet;

use diffprism_core::{Difference, FxHashMap};

use super::types::{ExampleList, StructuralPattern};
use crate::categorize::DifferenceCategory;

/// Immutable facts of a pattern, fixed when its signature is first seen.
#[derive(Debug, Clone)]
pub struct PatternSeed {
    pub path: String,
    pub parent_path: String,
    pub subject_property: String,
    pub category: DifferenceCategory,
    pub value_pair: Option<(String, String)>,
    pub is_collection_element: bool,
    pub is_critical: bool,
}

impl PatternSeed {
    pub fn new(
        path: impl Into<String>,
        parent_path: impl Into<String>,
        subject_property: impl Into<String>,
        category: DifferenceCategory,
    ) -> Self {
        Self {
            path: path.into(),
            parent_path: parent_path.into(),
            subject_property: subject_property.into(),
            category,
            value_pair: None,
            is_collection_element: false,
            is_critical: false,
        }
    }

    pub fn collection_element(mut self, yes: bool) -> Self {
        self.is_collection_element = yes;
        self
    }

    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    pub fn with_value_pair(mut self, old: String, new: String) -> Self {
        self.value_pair = Some((old, new));
        self
    }

    fn into_pattern(self, key: &str) -> StructuralPattern {
        StructuralPattern {
            key: key.to_string(),
            path: self.path,
            parent_path: self.parent_path,
            subject_property: self.subject_property,
            category: self.category,
            value_pair: self.value_pair,
            occurrence_count: 0,
            file_count: 0,
            affected_files: BTreeSet::new(),
            examples: ExampleList::new(),
            consistency: 0.0,
            is_collection_element: self.is_collection_element,
            is_critical: self.is_critical,
            description: String::new(),
            recommended_action: String::new(),
        }
    }
}

/// Map of pattern signature to accumulated pattern.
#[derive(Debug, Clone)]
pub struct PatternAccumulator {
    patterns: FxHashMap<String, StructuralPattern>,
    example_limit: usize,
}

impl PatternAccumulator {
    pub fn new(example_limit: usize) -> Self {
        Self {
            patterns: FxHashMap::default(),
            example_limit,
        }
    }

    /// Record `diff` from `file` under `key`, creating the pattern from `seed`
    /// the first time the key is seen.
    pub fn upsert<F>(&mut self, key: &str, seed: F, diff: &Difference, file: &str) -> &mut StructuralPattern
    where
        F: FnOnce() -> PatternSeed,
    {
        let limit = self.example_limit;
        let pattern = self
            .patterns
            .entry(key.to_string())
            .or_insert_with(|| seed().into_pattern(key));
        pattern.record(diff, file, limit);
        pattern
    }

    /// Fold `other` into `self`. Examples from `self` are kept first.
    pub fn merge(&mut self, other: PatternAccumulator) {
        let limit = self.example_limit;
        for (key, pattern) in other.patterns {
            match self.patterns.get_mut(&key) {
                Some(existing) => existing.absorb(pattern, limit),
                None => {
                    self.patterns.insert(key, pattern);
                }
            }
        }
    }

    /// Consuming form of [`merge`](Self::merge), convenient for rayon `reduce`.
    pub fn merged(mut self, other: PatternAccumulator) -> Self {
        self.merge(other);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StructuralPattern> {
        self.patterns.get(key)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn example_limit(&self) -> usize {
        self.example_limit
    }

    /// All patterns, sorted by key for deterministic downstream processing.
    pub fn into_patterns(self) -> Vec<StructuralPattern> {
        let mut patterns: Vec<StructuralPattern> = self.patterns.into_values().collect();
        patterns.sort_by(|a, b| a.key.cmp(&b.key));
        patterns
    }
}
