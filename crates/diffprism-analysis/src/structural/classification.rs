//! Per-file classification by dominant difference kind.
//!
//! Each file with differences lands in exactly one bucket: a kind is
//! significant when its share of the file's differences exceeds the threshold;
//! two or more significant kinds make the file `Mixed`.

use std::collections::BTreeMap;

use diffprism_core::{Difference, FilePairResult};

use super::order::is_likely_reorder;
use super::types::{
    FileClassification, FileClassificationBreakdown, FileClassificationDetail, FileKindCounts,
};
use crate::categorize::categorize;
use crate::paths;

/// Kind of a single difference for classification purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    Missing,
    Order,
    Value,
    Other,
}

/// Missing-ness and value shape come from [`categorize`]; order-likeness from
/// the reorder heuristic. Value changes whose sides differ in kind are `Other`.
pub fn kind_of(diff: &Difference, order_tolerance: f64) -> DifferenceKind {
    let category = categorize(diff);
    if category.is_missing() {
        return DifferenceKind::Missing;
    }
    if paths::has_index(&paths::normalize(&diff.property_path))
        && is_likely_reorder(diff, order_tolerance)
    {
        return DifferenceKind::Order;
    }
    let same_kind = diff.values().is_some_and(|(old, new)| old.same_kind(new));
    if category.is_value_change() && same_kind {
        DifferenceKind::Value
    } else {
        DifferenceKind::Other
    }
}

/// Tally difference kinds for one file.
pub fn count_kinds(differences: &[Difference], order_tolerance: f64) -> FileKindCounts {
    let mut counts = FileKindCounts::default();
    for diff in differences {
        match kind_of(diff, order_tolerance) {
            DifferenceKind::Missing => counts.missing += 1,
            DifferenceKind::Order => counts.order += 1,
            DifferenceKind::Value => counts.value += 1,
            DifferenceKind::Other => counts.other += 1,
        }
    }
    counts
}

/// Pick the classification from kind counts.
pub fn classify_counts(counts: &FileKindCounts, significance_threshold: f64) -> FileClassification {
    let total = counts.total();
    if total == 0 {
        return FileClassification::Uncategorized;
    }
    let significant = |n: u32| n as f64 / total as f64 > significance_threshold;
    let candidates = [
        (counts.value, FileClassification::Value),
        (counts.missing, FileClassification::Missing),
        (counts.order, FileClassification::Order),
        (counts.other, FileClassification::Uncategorized),
    ];
    let mut hits = candidates.iter().filter(|(n, _)| significant(*n));
    match (hits.next(), hits.next()) {
        (Some(_), Some(_)) => FileClassification::Mixed,
        (Some((_, classification)), None) => *classification,
        _ => FileClassification::Uncategorized,
    }
}

/// Classify every file with differences. Repeated file ids pool their counts.
pub fn classify_files<'a, I>(
    results: I,
    order_tolerance: f64,
    significance_threshold: f64,
) -> FileClassificationBreakdown
where
    I: IntoIterator<Item = &'a FilePairResult>,
{
    let mut pooled: BTreeMap<String, FileKindCounts> = BTreeMap::new();
    for result in results.into_iter().filter(|r| r.has_differences()) {
        let counts = count_kinds(&result.differences, order_tolerance);
        let slot = pooled.entry(result.file_id().to_string()).or_default();
        slot.missing += counts.missing;
        slot.order += counts.order;
        slot.value += counts.value;
        slot.other += counts.other;
    }

    let mut breakdown = FileClassificationBreakdown::default();
    for (file, counts) in pooled {
        let classification = classify_counts(&counts, significance_threshold);
        let bucket = match classification {
            FileClassification::Value => &mut breakdown.value_files,
            FileClassification::Missing => &mut breakdown.missing_files,
            FileClassification::Order => &mut breakdown.order_files,
            FileClassification::Mixed => &mut breakdown.mixed_files,
            FileClassification::Uncategorized => &mut breakdown.uncategorized_files,
        };
        bucket.push(file.clone());
        breakdown.per_file.insert(
            file,
            FileClassificationDetail {
                classification,
                counts,
            },
        );
    }
    breakdown
}
