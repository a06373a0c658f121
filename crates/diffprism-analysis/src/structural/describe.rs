//! Human-readable description and recommended action per pattern.
//! Written in the finishing pass, once counts are final.

use super::types::{PatternBucket, StructuralPattern};

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

pub(crate) fn describe(pattern: &mut StructuralPattern) {
    let files = plural(pattern.file_count, "file");
    let occurrences = plural(pattern.occurrence_count, "occurrence");
    let subject = pattern.subject_property.as_str();
    let path = pattern.path.as_str();

    let (description, action) = match pattern.bucket() {
        PatternBucket::CriticalMissing => (
            format!("Critical property '{subject}' is missing at '{path}' in {files} ({occurrences})"),
            format!("Investigate immediately: '{subject}' is required in every document"),
        ),
        PatternBucket::MissingProperties => (
            format!(
                "Property '{subject}' is missing under '{}' in {files} ({occurrences})",
                display_parent(&pattern.parent_path)
            ),
            format!("Check whether '{subject}' was removed or renamed and update the producer or the baseline"),
        ),
        PatternBucket::MissingCollectionElements => (
            format!(
                "Elements of collection '{}' are missing '{subject}' in {files} ({occurrences})",
                pattern.parent_path
            ),
            format!("Verify how '{subject}' is mapped for every element of '{}'", pattern.parent_path),
        ),
        PatternBucket::OrderDifferences => (
            format!("Elements of collection '{path}' appear in a different order in {files} ({occurrences})"),
            format!("Confirm whether the order of '{subject}' matters; sort both sides before comparing if it does not"),
        ),
        PatternBucket::ConsistentValueDifferences => {
            let (old, new) = pattern
                .value_pair
                .clone()
                .unwrap_or_else(|| (String::from("?"), String::from("?")));
            (
                format!("'{path}' consistently changes from '{old}' to '{new}' in {files} ({occurrences})"),
                format!("Treat '{old}' -> '{new}' on '{subject}' as a systematic mapping change"),
            )
        }
        PatternBucket::GeneralValueDifferences => {
            if pattern.file_count > 1 {
                (
                    format!("'{path}' varies across {files} ({occurrences})"),
                    format!("Decide whether '{subject}' is expected to vary between runs and exclude it if so"),
                )
            } else {
                (
                    format!("'{path}' has differences within this file ({occurrences})"),
                    format!("Inspect the values of '{subject}' in the affected file"),
                )
            }
        }
        PatternBucket::Uncategorized => (
            format!("{occurrences} across {files} did not match any structural pattern"),
            String::from("Review these differences manually"),
        ),
    };

    pattern.description = description;
    pattern.recommended_action = action;
}

fn display_parent(parent: &str) -> &str {
    if parent.is_empty() {
        "<root>"
    } else {
        parent
    }
}
