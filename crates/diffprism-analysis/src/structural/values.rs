//! Recurring value-change and general value-change passes.

use diffprism_core::FxHashMap;

use super::accumulator::PatternSeed;
use super::prepared::{PreparedFile, Shard};
use crate::categorize::DifferenceCategory;
use crate::paths;

/// Per normalized path, how often each `(old, new)` pair was seen.
pub(crate) type ValueTally = FxHashMap<String, FxHashMap<(String, String), u32>>;

/// Count value pairs of one file's present-on-both-sides differences.
pub(crate) fn tally_file(file: &PreparedFile<'_>) -> ValueTally {
    let mut tally = ValueTally::default();
    for prepared in file.diffs.iter().filter(|d| d.is_present()) {
        *tally
            .entry(prepared.normalized.clone())
            .or_default()
            .entry(prepared.diff.value_pair())
            .or_default() += 1;
    }
    tally
}

pub(crate) fn merge_tallies(mut left: ValueTally, right: ValueTally) -> ValueTally {
    for (path, pairs) in right {
        let slot = left.entry(path).or_default();
        for (pair, count) in pairs {
            *slot.entry(pair).or_default() += count;
        }
    }
    left
}

/// Most frequent pair per path, kept only when it was seen at least twice.
/// Ties go to the lexically smallest pair.
pub(crate) fn select_recurring(tally: &ValueTally) -> FxHashMap<String, (String, String)> {
    tally
        .iter()
        .filter_map(|(path, pairs)| {
            let (pair, count) = pairs
                .iter()
                .max_by(|(pa, ca), (pb, cb)| ca.cmp(cb).then_with(|| pb.cmp(pa)))?;
            (*count >= 2).then(|| (path.clone(), pair.clone()))
        })
        .collect()
}

/// Collect every difference matching its path's recurring pair.
pub(crate) fn mine_recurring(
    file: &PreparedFile<'_>,
    recurring: &FxHashMap<String, (String, String)>,
    shard: &mut Shard,
) {
    for prepared in file.diffs.iter().filter(|d| d.is_present()) {
        let Some((old, new)) = recurring.get(&prepared.normalized) else {
            continue;
        };
        let pair = prepared.diff.value_pair();
        if pair.0 != *old || pair.1 != *new {
            continue;
        }
        let path = prepared.normalized.as_str();
        let key = format!("value:{path}:{old}->{new}");
        shard.patterns.upsert(
            &key,
            || {
                PatternSeed::new(
                    path,
                    paths::parent_path(path),
                    paths::last_segment(path),
                    infer_value_category(old, new),
                )
                .collection_element(paths::has_index(path))
                .with_value_pair(old.clone(), new.clone())
            },
            prepared.diff,
            file.file_id,
        );
        shard.claim(file, prepared);
    }
}

/// Record every path carrying a present-on-both-sides change, regardless of the
/// values involved. Summary view only: differences are not claimed.
pub(crate) fn mine_general(file: &PreparedFile<'_>, shard: &mut Shard) {
    for prepared in file.diffs.iter().filter(|d| d.is_present()) {
        let path = prepared.normalized.as_str();
        let key = format!("general:{path}");
        shard.patterns.upsert(
            &key,
            || {
                PatternSeed::new(
                    path,
                    paths::parent_path(path),
                    paths::last_segment(path),
                    DifferenceCategory::GeneralValueChanged,
                )
                .collection_element(paths::has_index(path))
            },
            prepared.diff,
            file.file_id,
        );
    }
}

/// Category of a recurring pair inferred from the rendered values.
///
/// Numbers first, then boolean literals, then date separators (`-`, `/`, `:`)
/// on both sides; anything else is text.
pub fn infer_value_category(old: &str, new: &str) -> DifferenceCategory {
    let is_number = |s: &str| s.trim().parse::<f64>().is_ok();
    let is_bool = |s: &str| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false");
    let has_date_separator = |s: &str| s.contains(['-', '/', ':']);

    if is_number(old) && is_number(new) {
        DifferenceCategory::NumericChanged
    } else if is_bool(old) && is_bool(new) {
        DifferenceCategory::BooleanChanged
    } else if has_date_separator(old) && has_date_separator(new) {
        DifferenceCategory::DateTimeChanged
    } else {
        DifferenceCategory::TextChanged
    }
}
