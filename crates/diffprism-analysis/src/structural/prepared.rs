//! Per-file views of the input with paths normalized once.

use diffprism_core::{Difference, FolderResult, FxHashSet};

use super::accumulator::PatternAccumulator;
use crate::categorize::{categorize, DifferenceCategory};
use crate::paths;

pub(crate) struct PreparedDiff<'a> {
    /// Position within the file's difference list.
    pub index: usize,
    pub diff: &'a Difference,
    pub normalized: String,
    pub category: DifferenceCategory,
}

impl PreparedDiff<'_> {
    /// One side absent, as decided by the categorizer.
    pub fn is_missing(&self) -> bool {
        self.category.is_missing()
    }

    pub fn is_present(&self) -> bool {
        !self.category.is_missing()
    }
}

pub(crate) struct PreparedFile<'a> {
    /// Position among the files with differences.
    pub ordinal: usize,
    pub file_id: &'a str,
    pub diffs: Vec<PreparedDiff<'a>>,
}

/// Differences already explained by a pass, as `(file ordinal, diff index)`.
pub(crate) type ClaimSet = FxHashSet<(usize, usize)>;

/// Only pairs reported as not equal take part in mining.
pub(crate) fn prepare(folder: &FolderResult) -> Vec<PreparedFile<'_>> {
    folder
        .files_with_differences()
        .enumerate()
        .map(|(ordinal, result)| PreparedFile {
            ordinal,
            file_id: result.file_id(),
            diffs: result
                .differences
                .iter()
                .enumerate()
                .map(|(index, diff)| PreparedDiff {
                    index,
                    diff,
                    normalized: paths::normalize(&diff.property_path),
                    category: categorize(diff),
                })
                .collect(),
        })
        .collect()
}

/// Partial result of one or more passes over a subset of files.
pub(crate) struct Shard {
    pub patterns: PatternAccumulator,
    pub claimed: ClaimSet,
}

impl Shard {
    pub fn new(example_limit: usize) -> Self {
        Self {
            patterns: PatternAccumulator::new(example_limit),
            claimed: ClaimSet::default(),
        }
    }

    pub fn claim(&mut self, file: &PreparedFile<'_>, diff: &PreparedDiff<'_>) {
        self.claimed.insert((file.ordinal, diff.index));
    }

    /// Associative merge; `self` holds the earlier files.
    pub fn merged(mut self, other: Shard) -> Self {
        self.patterns.merge(other.patterns);
        self.claimed.extend(other.claimed);
        self
    }
}
