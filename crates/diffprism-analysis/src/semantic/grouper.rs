//! SemanticGrouper buckets every difference into at most one themed group.
//!
//! Slots are laid out in rule order: named predicates, then configured document
//! sections, then value shapes. A difference goes to the first matching slot.

use diffprism_core::config::SemanticConfig;
use diffprism_core::{Difference, FilePairResult, FxHashMap};
use rayon::prelude::*;

use super::rules::{RuleInput, SectionMatcher, PREDICATES, SHAPES};
use super::types::{SemanticDifferenceAnalysis, SemanticGroup};
use crate::paths;

/// Groups differences into human-facing themes.
pub struct SemanticGrouper {
    config: SemanticConfig,
    sections: SectionMatcher,
}

/// Partial grouping of a subset of files.
struct Partial {
    slots: FxHashMap<usize, SemanticGroup>,
    total: usize,
    categorized: usize,
}

impl Partial {
    fn empty() -> Self {
        Self {
            slots: FxHashMap::default(),
            total: 0,
            categorized: 0,
        }
    }

    fn merged(mut self, other: Partial) -> Self {
        for (slot, group) in other.slots {
            match self.slots.get_mut(&slot) {
                Some(existing) => existing.absorb(group),
                None => {
                    self.slots.insert(slot, group);
                }
            }
        }
        self.total += other.total;
        self.categorized += other.categorized;
        self
    }
}

impl SemanticGrouper {
    pub fn new(config: SemanticConfig) -> Self {
        let sections = SectionMatcher::new(&config.sections);
        Self { config, sections }
    }

    pub fn with_defaults() -> Self {
        Self::new(SemanticConfig::default())
    }

    /// Slot of the first rule matching `input`, if any.
    pub fn classify(&self, input: &RuleInput<'_>) -> Option<usize> {
        if let Some(i) = PREDICATES.iter().position(|p| p.matches(input)) {
            return Some(i);
        }
        let sections_start = PREDICATES.len();
        if let Some(i) = self.sections.find(input.normalized) {
            return Some(sections_start + i);
        }
        let shapes_start = sections_start + self.sections.len();
        SHAPES
            .iter()
            .position(|s| s.matches(input.diff))
            .map(|i| shapes_start + i)
    }

    /// Name and description of a slot.
    fn slot_template(&self, slot: usize) -> SemanticGroup {
        let sections_start = PREDICATES.len();
        let shapes_start = sections_start + self.sections.len();
        if slot < sections_start {
            let p = &PREDICATES[slot];
            SemanticGroup::new(p.name, p.description)
        } else if slot < shapes_start {
            let section = self
                .sections
                .sections()
                .nth(slot - sections_start)
                .map(|s| (s.name.clone(), s.description.clone()))
                .unwrap_or_default();
            SemanticGroup::new(section.0, section.1)
        } else {
            let s = &SHAPES[slot - shapes_start];
            SemanticGroup::new(s.name, s.description)
        }
    }

    /// Group every difference of the pairs reported as not equal.
    pub fn analyze(&self, results: &[FilePairResult]) -> SemanticDifferenceAnalysis {
        let partial = results
            .par_iter()
            .filter(|r| r.has_differences())
            .map(|r| self.group_file(r))
            .reduce(Partial::empty, Partial::merged);

        let mut groups: Vec<SemanticGroup> = partial
            .slots
            .into_values()
            .filter(|g| !g.is_empty())
            .map(|mut g| {
                g.refresh_confidence();
                g
            })
            .collect();
        groups.sort_by(|a, b| {
            b.confidence_level
                .cmp(&a.confidence_level)
                .then_with(|| b.differences.len().cmp(&a.differences.len()))
                .then_with(|| a.name.cmp(&b.name))
        });

        let categorized_ratio = if partial.total == 0 {
            0.0
        } else {
            partial.categorized as f64 / partial.total as f64
        };

        tracing::debug!(
            groups = groups.len(),
            total = partial.total,
            categorized = partial.categorized,
            "semantic grouping complete"
        );

        SemanticDifferenceAnalysis {
            groups,
            total_differences: partial.total,
            categorized_differences: partial.categorized,
            uncategorized_differences: partial.total - partial.categorized,
            categorized_ratio,
        }
    }

    fn group_file(&self, result: &FilePairResult) -> Partial {
        let mut partial = Partial::empty();
        for diff in &result.differences {
            partial.total += 1;
            let normalized = paths::normalize(&diff.property_path);
            let input = RuleInput::new(diff, &normalized, self.config.order_numeric_tolerance);
            let Some(slot) = self.classify(&input) else {
                continue;
            };
            partial.categorized += 1;
            partial
                .slots
                .entry(slot)
                .or_insert_with(|| self.slot_template(slot))
                .add(diff, result.file_id(), &normalized);
        }
        partial
    }

    /// Name of the group a single difference would join, if any.
    pub fn group_name_for(&self, diff: &Difference) -> Option<String> {
        let normalized = paths::normalize(&diff.property_path);
        let input = RuleInput::new(diff, &normalized, self.config.order_numeric_tolerance);
        self.classify(&input).map(|slot| self.slot_template(slot).name)
    }
}
