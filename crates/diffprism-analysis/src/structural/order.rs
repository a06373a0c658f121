//! Order-difference pass and the per-difference reorder heuristic.

use std::collections::{BTreeMap, BTreeSet};

use diffprism_core::{Difference, Value};

use super::accumulator::PatternSeed;
use super::prepared::{PreparedDiff, PreparedFile, Shard};
use crate::categorize::DifferenceCategory;
use crate::paths;

/// Characters compared by the string-prefix reorder rule.
const PREFIX_LEN: usize = 3;

#[derive(Default)]
struct CollectionTouch<'p, 'a> {
    indices: BTreeSet<String>,
    present: Vec<&'p PreparedDiff<'a>>,
}

/// Flag collections of one file whose elements look shuffled.
///
/// A collection qualifies when more than one index is touched, at least one of
/// its differences has values on both sides, and the singular-entity suffix
/// guard does not exclude it.
pub(crate) fn mine_order(file: &PreparedFile<'_>, exclusion_suffixes: &[String], shard: &mut Shard) {
    let mut collections: BTreeMap<String, CollectionTouch<'_, '_>> = BTreeMap::new();
    for prepared in &file.diffs {
        let Some(position) = paths::element_position(&prepared.diff.property_path) else {
            continue;
        };
        let touch = collections.entry(position.collection).or_default();
        touch.indices.insert(position.index);
        if prepared.is_present() {
            touch.present.push(prepared);
        }
    }

    for (collection, touch) in &collections {
        if touch.indices.len() <= 1 || touch.present.is_empty() {
            continue;
        }
        if is_excluded(collection, touch.indices.len(), exclusion_suffixes) {
            continue;
        }
        let key = format!("order:{collection}");
        for prepared in &touch.present {
            shard.patterns.upsert(
                &key,
                || {
                    PatternSeed::new(
                        collection.as_str(),
                        paths::parent_path(collection),
                        paths::last_segment(collection),
                        DifferenceCategory::ElementOrderChanged,
                    )
                    .collection_element(true)
                },
                prepared.diff,
                file.file_id,
            );
            shard.claim(file, prepared);
        }
    }
}

/// Singular-entity guard: a collection named like one entity and touched at one
/// index or fewer cannot exhibit ordering.
///
/// Subsumed by the more-than-one-index requirement checked before it, so it
/// never changes which collections qualify.
fn is_excluded(collection: &str, index_count: usize, suffixes: &[String]) -> bool {
    if index_count > 1 {
        return false;
    }
    let name = paths::last_segment(collection).to_ascii_lowercase();
    suffixes
        .iter()
        .any(|suffix| name.ends_with(&suffix.to_ascii_lowercase()))
}

/// Best-effort guess that a single difference comes from reordered elements.
///
/// Both values must be present and of the same kind; numbers count when they
/// are within `tolerance` of each other, strings when their first three
/// characters agree. This over- and under-fires by nature.
pub fn is_likely_reorder(diff: &Difference, tolerance: f64) -> bool {
    let Some((old, new)) = diff.values() else {
        return false;
    };
    if !old.same_kind(new) {
        return false;
    }
    match (old, new) {
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            match (old.as_f64(), new.as_f64()) {
                (Some(a), Some(b)) => (a - b).abs() <= tolerance,
                _ => false,
            }
        }
        (Value::Text(a), Value::Text(b)) | (Value::Other(a), Value::Other(b)) => prefixes_overlap(a, b),
        _ => false,
    }
}

fn prefixes_overlap(a: &str, b: &str) -> bool {
    let n = PREFIX_LEN.min(a.chars().count()).min(b.chars().count());
    n > 0 && a.chars().take(n).eq(b.chars().take(n))
}
