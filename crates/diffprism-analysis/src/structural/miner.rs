//! StructuralMiner: runs the mining passes over one folder result.
//!
//! Pipeline:
//! 1. Per file (rayon): critical/missing routing, order detection, general value changes
//! 2. Global value-pair tally, then per file: recurring value changes
//! 3. Per file: uncategorized residual (differences no pass claimed)
//! 4. Finishing: consistency, descriptions, bucket routing, classification, coverage

use std::collections::BTreeSet;

use diffprism_core::config::StructuralConfig;
use diffprism_core::FolderResult;
use rayon::prelude::*;

use super::accumulator::{PatternAccumulator, PatternSeed};
use super::classification::classify_files;
use super::describe::describe;
use super::missing::{mine_missing, CriticalMatcher};
use super::order::mine_order;
use super::prepared::{prepare, ClaimSet, PreparedFile, Shard};
use super::types::{PatternBucket, StructuralAnalysisResult, StructuralPattern, StructuralSummary};
use super::values::{merge_tallies, mine_general, mine_recurring, select_recurring, tally_file, ValueTally};
use crate::categorize::DifferenceCategory;

const UNCATEGORIZED_KEY: &str = "uncategorized";

/// Mines structural patterns from a folder of file-pair differences.
pub struct StructuralMiner {
    config: StructuralConfig,
    critical: CriticalMatcher,
}

impl StructuralMiner {
    pub fn new(config: StructuralConfig) -> Self {
        let critical = CriticalMatcher::new(&config.critical_properties);
        Self { config, critical }
    }

    pub fn with_defaults() -> Self {
        Self::new(StructuralConfig::default())
    }

    pub fn config(&self) -> &StructuralConfig {
        &self.config
    }

    /// Run every pass and produce the bucketed result.
    pub fn mine(&self, folder: &FolderResult) -> StructuralAnalysisResult {
        let files = prepare(folder);
        let files_with_differences = files
            .iter()
            .map(|f| f.file_id)
            .collect::<BTreeSet<_>>()
            .len();
        let total_differences: usize = files.iter().map(|f| f.diffs.len()).sum();

        tracing::debug!(
            pairs = folder.file_pair_results.len(),
            files_with_differences,
            total_differences,
            "structural mining started"
        );

        let limit = self.config.example_limit;

        // Pass 1: file-local passes.
        let local = files
            .par_iter()
            .map(|file| {
                let mut shard = Shard::new(limit);
                mine_missing(file, &self.critical, &mut shard);
                mine_order(file, &self.config.order_exclusion_suffixes, &mut shard);
                mine_general(file, &mut shard);
                shard
            })
            .reduce(|| Shard::new(limit), Shard::merged);

        // Pass 2: recurring value pairs need the global tally first.
        let tally = files
            .par_iter()
            .map(tally_file)
            .reduce(ValueTally::default, merge_tallies);
        let recurring = select_recurring(&tally);
        let recurring_shard = files
            .par_iter()
            .map(|file| {
                let mut shard = Shard::new(limit);
                mine_recurring(file, &recurring, &mut shard);
                shard
            })
            .reduce(|| Shard::new(limit), Shard::merged);

        let mut combined = local.merged(recurring_shard);

        // Pass 3: residual.
        let residual = files
            .par_iter()
            .map(|file| uncategorized_residual(file, &combined.claimed, limit))
            .reduce(|| PatternAccumulator::new(limit), PatternAccumulator::merged);
        combined.patterns.merge(residual);

        let result = self.finish(folder, combined.patterns, files_with_differences, total_differences);

        tracing::info!(
            patterns = result.summary.pattern_count,
            critical = result.summary.critical_pattern_count,
            unaccounted = result.unaccounted_files.len(),
            "structural mining complete"
        );
        result
    }

    fn finish(
        &self,
        folder: &FolderResult,
        patterns: PatternAccumulator,
        files_with_differences: usize,
        total_differences: usize,
    ) -> StructuralAnalysisResult {
        let mut result = StructuralAnalysisResult::default();
        let mut covered: BTreeSet<String> = BTreeSet::new();
        let mut uncategorized_differences = 0;

        for mut pattern in patterns.into_patterns() {
            pattern.consistency = consistency(pattern.file_count as usize, files_with_differences);
            describe(&mut pattern);
            covered.extend(pattern.affected_files.iter().cloned());
            if pattern.key == UNCATEGORIZED_KEY {
                uncategorized_differences = pattern.occurrence_count;
            }
            result.bucket_mut(pattern.bucket()).push(pattern);
        }

        let mut bucket_counts = std::collections::BTreeMap::new();
        for bucket in PatternBucket::ALL {
            let patterns = result.bucket_mut(bucket);
            patterns.sort_by(rank);
            bucket_counts.insert(bucket, patterns.len());
        }

        result.unaccounted_files = folder
            .files_with_differences()
            .map(|r| r.file_id().to_string())
            .collect::<BTreeSet<_>>()
            .difference(&covered)
            .cloned()
            .collect();
        if !result.unaccounted_files.is_empty() {
            tracing::warn!(
                files = ?result.unaccounted_files,
                "files with differences not covered by any pattern"
            );
        }

        result.file_classification = classify_files(
            &folder.file_pair_results,
            self.config.order_numeric_tolerance,
            self.config.significance_threshold,
        );

        result.summary = StructuralSummary {
            total_file_pairs: folder.file_pair_results.len(),
            files_with_differences,
            total_differences,
            pattern_count: bucket_counts.values().sum(),
            critical_pattern_count: bucket_counts
                .get(&PatternBucket::CriticalMissing)
                .copied()
                .unwrap_or(0),
            uncategorized_differences,
            bucket_counts,
        };
        result
    }
}

fn uncategorized_residual(file: &PreparedFile<'_>, claimed: &ClaimSet, limit: usize) -> PatternAccumulator {
    let mut residual = PatternAccumulator::new(limit);
    for prepared in &file.diffs {
        if claimed.contains(&(file.ordinal, prepared.index)) {
            continue;
        }
        residual.upsert(
            UNCATEGORIZED_KEY,
            || {
                PatternSeed::new(
                    "",
                    "",
                    "",
                    DifferenceCategory::UncategorizedDifference,
                )
            },
            prepared.diff,
            file.file_id,
        );
    }
    residual
}

/// Share of files-with-differences exhibiting a pattern, in percent, rounded to
/// one decimal. Zero when there are no files with differences.
pub fn consistency(file_count: usize, files_with_differences: usize) -> f64 {
    if files_with_differences == 0 {
        return 0.0;
    }
    let raw = file_count as f64 / files_with_differences as f64 * 100.0;
    ((raw * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

/// Consistency desc, occurrences desc, key asc.
fn rank(a: &StructuralPattern, b: &StructuralPattern) -> std::cmp::Ordering {
    b.consistency
        .total_cmp(&a.consistency)
        .then_with(|| b.occurrence_count.cmp(&a.occurrence_count))
        .then_with(|| a.key.cmp(&b.key))
}
