//! Critical-property, missing-property and collection-element-missing passes.

use aho_corasick::AhoCorasick;

use super::accumulator::PatternSeed;
use super::prepared::{PreparedDiff, PreparedFile, Shard};
use crate::categorize::DifferenceCategory;
use crate::paths;

/// Case-insensitive matcher for configured critical property names.
///
/// A path is critical when it contains a configured name, which also covers an
/// exact last-segment match.
pub(crate) struct CriticalMatcher {
    automaton: Option<AhoCorasick>,
}

impl CriticalMatcher {
    pub fn new(names: &[String]) -> Self {
        if names.is_empty() {
            return Self { automaton: None };
        }
        let automaton = match AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(names)
        {
            Ok(ac) => Some(ac),
            Err(e) => {
                tracing::warn!(error = %e, "critical property matcher unavailable, skipping critical pass");
                None
            }
        };
        Self { automaton }
    }

    pub fn is_critical(&self, normalized: &str) -> bool {
        self.automaton
            .as_ref()
            .is_some_and(|ac| ac.is_match(normalized))
    }
}

/// Route every missing-on-one-side difference of a file to exactly one of the
/// critical, collection-element or property patterns.
pub(crate) fn mine_missing(file: &PreparedFile<'_>, critical: &CriticalMatcher, shard: &mut Shard) {
    for prepared in file.diffs.iter().filter(|d| d.is_missing()) {
        if critical.is_critical(&prepared.normalized) {
            record_critical(file, prepared, shard);
        } else if paths::has_index(&prepared.normalized) {
            record_collection_missing(file, prepared, shard);
        } else {
            record_property_missing(file, prepared, shard);
        }
        shard.claim(file, prepared);
    }
}

fn record_critical(file: &PreparedFile<'_>, prepared: &PreparedDiff<'_>, shard: &mut Shard) {
    let path = prepared.normalized.as_str();
    let in_collection = paths::has_index(path);
    let key = format!("critical:{path}");
    shard.patterns.upsert(
        &key,
        || {
            let category = if in_collection {
                DifferenceCategory::CollectionElementMissing
            } else {
                DifferenceCategory::PropertyMissing
            };
            PatternSeed::new(path, paths::parent_path(path), paths::last_segment(path), category)
                .collection_element(in_collection)
                .critical()
        },
        prepared.diff,
        file.file_id,
    );
}

fn record_collection_missing(file: &PreparedFile<'_>, prepared: &PreparedDiff<'_>, shard: &mut Shard) {
    let Some((collection, property)) = paths::split_collection(&prepared.normalized) else {
        return record_property_missing(file, prepared, shard);
    };
    let path = if property.is_empty() {
        format!("{collection}{}", paths::WILDCARD)
    } else {
        format!("{collection}{}.{property}", paths::WILDCARD)
    };
    let subject = if property.is_empty() {
        paths::last_segment(collection)
    } else {
        property
    };
    let key = format!("collection:{path}");
    shard.patterns.upsert(
        &key,
        || {
            PatternSeed::new(
                path.as_str(),
                collection,
                subject,
                DifferenceCategory::CollectionElementMissing,
            )
            .collection_element(true)
        },
        prepared.diff,
        file.file_id,
    );
}

fn record_property_missing(file: &PreparedFile<'_>, prepared: &PreparedDiff<'_>, shard: &mut Shard) {
    let path = prepared.normalized.as_str();
    let parent = paths::parent_path(path);
    let subject = paths::last_segment(path);
    let key = if parent.is_empty() {
        format!("missing:{subject}")
    } else {
        format!("missing:{parent}.{subject}")
    };
    shard.patterns.upsert(
        &key,
        || PatternSeed::new(path, parent, subject, DifferenceCategory::PropertyMissing),
        prepared.diff,
        file.file_id,
    );
}
