//! Semantic rules: named predicates, then document sections, then value shapes.
//! Rule order matters: the first match wins.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use diffprism_core::config::DocumentSection;
use diffprism_core::Difference;
use regex::Regex;

use crate::categorize::categorizer::{
    contains_any, is_amount_field, is_date_field, is_description_field, is_identifier_field,
    is_name_field, is_status_field,
};
use crate::categorize::{categorize, DifferenceCategory};
use crate::paths;
use crate::structural::is_likely_reorder;

/// One difference as seen by the rules.
pub struct RuleInput<'a> {
    pub diff: &'a Difference,
    pub normalized: &'a str,
    /// Last segment of `normalized`, without a leading `@`.
    pub field: &'a str,
    pub category: DifferenceCategory,
    pub order_tolerance: f64,
}

impl<'a> RuleInput<'a> {
    pub fn new(diff: &'a Difference, normalized: &'a str, order_tolerance: f64) -> Self {
        Self {
            diff,
            normalized,
            field: paths::last_segment(normalized).trim_start_matches('@'),
            category: categorize(diff),
            order_tolerance,
        }
    }

    fn either_value(&self, test: impl Fn(&diffprism_core::Value) -> bool) -> bool {
        self.diff.old_value.as_ref().is_some_and(&test) || self.diff.new_value.as_ref().is_some_and(&test)
    }
}

/// A fixed, named predicate over path text and value types.
pub struct NamedPredicate {
    pub name: &'static str,
    pub description: &'static str,
    test: fn(&RuleInput<'_>) -> bool,
}

impl NamedPredicate {
    pub fn matches(&self, input: &RuleInput<'_>) -> bool {
        (self.test)(input)
    }
}

/// Predicates in priority order.
pub static PREDICATES: [NamedPredicate; 7] = [
    NamedPredicate {
        name: "Status Changes",
        description: "Status or state values differ",
        test: |i| is_status_field(i.field),
    },
    NamedPredicate {
        name: "ID Value Changes",
        description: "Identifier values differ",
        test: |i| is_identifier_field(i.field),
    },
    NamedPredicate {
        name: "Date/Time Changes",
        description: "Dates, times or timestamps differ",
        test: |i| is_date_field(i.field) || i.either_value(|v| v.is_temporal()),
    },
    NamedPredicate {
        name: "Score/Value Adjustments",
        description: "Scores, amounts or other numeric values differ",
        test: |i| {
            is_amount_field(i.field)
                || contains_any(i.field, &["rating", "rank"])
                || i.category == DifferenceCategory::NumericChanged
        },
    },
    NamedPredicate {
        name: "Name/Description Changes",
        description: "Names, titles, labels or descriptions differ",
        test: |i| is_name_field(i.field) || is_description_field(i.field) || contains_any(i.field, &["label"]),
    },
    NamedPredicate {
        name: "Collection Order Differences",
        description: "Collection elements appear in a different order",
        test: |i| paths::has_index(i.normalized) && is_likely_reorder(i.diff, i.order_tolerance),
    },
    NamedPredicate {
        name: "Tag Modifications",
        description: "Tags, keywords or categories differ",
        test: |i| contains_any(i.field, &["tag", "keyword", "category"]),
    },
];

/// Configured document sections compiled to case-insensitive matchers.
pub struct SectionMatcher {
    sections: Vec<(DocumentSection, Option<AhoCorasick>)>,
}

impl SectionMatcher {
    pub fn new(sections: &[DocumentSection]) -> Self {
        let sections = sections
            .iter()
            .map(|section| {
                let automaton = AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&section.keywords)
                    .map_err(|e| {
                        tracing::warn!(section = %section.name, error = %e, "section matcher unavailable");
                    })
                    .ok();
                (section.clone(), automaton)
            })
            .collect();
        Self { sections }
    }

    /// Index of the first section whose keywords occur in the path.
    pub fn find(&self, normalized: &str) -> Option<usize> {
        self.sections.iter().position(|(_, automaton)| {
            automaton.as_ref().is_some_and(|ac| ac.is_match(normalized))
        })
    }

    pub fn sections(&self) -> impl Iterator<Item = &DocumentSection> {
        self.sections.iter().map(|(section, _)| section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

static GUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{?[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\}?$")
        .expect("valid guid regex")
});

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[vV]?\d+(\.\d+){1,3}$").expect("valid version regex"));

/// A value-shape detector applied to both rendered values.
pub struct ShapeDetector {
    pub name: &'static str,
    pub description: &'static str,
    test: fn(&str) -> bool,
}

impl ShapeDetector {
    /// Both sides must be present and match the shape.
    pub fn matches(&self, diff: &Difference) -> bool {
        diff.values().is_some_and(|(old, new)| {
            (self.test)(old.to_string().trim()) && (self.test)(new.to_string().trim())
        })
    }
}

/// Shapes in priority order.
pub static SHAPES: [ShapeDetector; 3] = [
    ShapeDetector {
        name: "Identifier Replacements",
        description: "GUID-like identifiers replaced by other GUIDs",
        test: |s| GUID.is_match(s),
    },
    ShapeDetector {
        name: "URL/Path Changes",
        description: "URLs or file paths differ",
        test: |s| s.contains(['/', '\\']),
    },
    ShapeDetector {
        name: "Version Changes",
        description: "Dotted version numbers differ",
        test: |s| VERSION.is_match(s),
    },
];
