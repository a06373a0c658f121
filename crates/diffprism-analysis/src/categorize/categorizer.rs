//! Per-difference categorization.
//!
//! [`categorize`] is purely type- and path-shape based. [`categorize_enhanced`]
//! first looks at the field name (last path segment) and attribute markers.

use diffprism_core::{Difference, Value};

use super::taxonomy::{DifferenceCategory, EnhancedCategory};
use crate::paths;

/// Assign one [`DifferenceCategory`] to a difference. First matching rule wins:
///
/// 1. a side is absent: `ItemAdded`/`ItemRemoved` at an element position,
///    `NullValueChange` elsewhere;
/// 2. both sides share a numeric, temporal, textual or boolean type;
/// 3. the path ends in an index: `CollectionItemChanged`;
/// 4. `ValueChanged`.
pub fn categorize(diff: &Difference) -> DifferenceCategory {
    let element_position = paths::ends_with_index(&diff.property_path);

    let (old, new) = match (&diff.old_value, &diff.new_value) {
        (Some(old), Some(new)) => (old, new),
        (None, Some(_)) if element_position => return DifferenceCategory::ItemAdded,
        (Some(_), None) if element_position => return DifferenceCategory::ItemRemoved,
        _ => return DifferenceCategory::NullValueChange,
    };

    if let Some(category) = category_by_type(old, new) {
        return category;
    }
    if element_position {
        return DifferenceCategory::CollectionItemChanged;
    }
    DifferenceCategory::ValueChanged
}

fn category_by_type(old: &Value, new: &Value) -> Option<DifferenceCategory> {
    if old.is_numeric() && new.is_numeric() {
        Some(DifferenceCategory::NumericChanged)
    } else if old.is_temporal() && new.is_temporal() {
        Some(DifferenceCategory::DateTimeChanged)
    } else if old.is_textual() && new.is_textual() {
        Some(DifferenceCategory::TextChanged)
    } else if old.is_boolean() && new.is_boolean() {
        Some(DifferenceCategory::BooleanChanged)
    } else {
        None
    }
}

/// Field-name-aware categorization.
///
/// Attribute paths (a segment starting with `@`) are tagged first. When both
/// sides are present, the last segment is matched against identifier, name,
/// description, status, date, quantity, value and boolean-flag shapes in that
/// order. Anything else falls back to [`categorize`].
pub fn categorize_enhanced(diff: &Difference) -> EnhancedCategory {
    let normalized = paths::normalize(&diff.property_path);

    if paths::is_attribute_path(&normalized) {
        return if diff.is_missing() {
            EnhancedCategory::XmlAttributeMissing
        } else {
            EnhancedCategory::XmlAttributeValueChanged
        };
    }

    if let Some((old, new)) = diff.values() {
        let field = paths::last_segment(&normalized);
        let field = field.trim_start_matches('@');
        if is_identifier_field(field) {
            return EnhancedCategory::IdentifierMismatch;
        }
        if is_name_field(field) {
            return EnhancedCategory::NameValueChange;
        }
        if is_description_field(field) {
            return EnhancedCategory::DescriptionChange;
        }
        if is_status_field(field) {
            return EnhancedCategory::StatusValueChange;
        }
        if is_date_field(field) || old.is_temporal() || new.is_temporal() {
            return EnhancedCategory::TimestampChange;
        }
        if is_quantity_field(field) {
            return EnhancedCategory::QuantityChange;
        }
        if is_amount_field(field) {
            return EnhancedCategory::AmountValueChange;
        }
        if is_boolean_field(field) || (old.is_boolean() && new.is_boolean()) {
            return EnhancedCategory::BooleanFlagChange;
        }
    }

    EnhancedCategory::Base(categorize(diff))
}

pub(crate) fn contains_any(field: &str, needles: &[&str]) -> bool {
    let lower = field.to_ascii_lowercase();
    needles.iter().any(|needle| lower.contains(needle))
}

pub(crate) fn is_identifier_field(field: &str) -> bool {
    let lower = field.to_ascii_lowercase();
    lower == "id"
        || field.ends_with("Id")
        || field.ends_with("ID")
        || lower.ends_with("_id")
        || contains_any(field, &["guid", "uuid", "identifier"])
}

pub(crate) fn is_name_field(field: &str) -> bool {
    contains_any(field, &["name", "title"])
}

pub(crate) fn is_description_field(field: &str) -> bool {
    contains_any(field, &["description", "desc", "comment", "note"])
}

pub(crate) fn is_status_field(field: &str) -> bool {
    contains_any(field, &["status", "state"])
}

pub(crate) fn is_date_field(field: &str) -> bool {
    contains_any(field, &["date", "time", "timestamp"])
}

pub(crate) fn is_quantity_field(field: &str) -> bool {
    contains_any(field, &["quantity", "qty", "count"])
}

pub(crate) fn is_amount_field(field: &str) -> bool {
    contains_any(field, &["amount", "price", "total", "value", "score"])
}

pub(crate) fn is_boolean_field(field: &str) -> bool {
    let lower = field.to_ascii_lowercase();
    let camel_prefix = ["Is", "Has", "Can", "Should"].iter().any(|prefix| {
        field
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    });
    camel_prefix
        || ["is_", "has_", "can_", "should_"].iter().any(|p| lower.starts_with(p))
        || lower.ends_with("enabled")
        || lower.ends_with("flag")
}
