//! Structural pattern miner tests.

use std::collections::BTreeSet;

use diffprism_analysis::categorize::DifferenceCategory;
use diffprism_analysis::structural::classification::{kind_of, DifferenceKind};
use diffprism_analysis::structural::miner::consistency;
use diffprism_analysis::structural::{
    infer_value_category, is_likely_reorder, FileClassification, PatternBucket, StructuralMiner,
};
use diffprism_core::config::StructuralConfig;
use diffprism_core::{Difference, FilePairResult, FolderResult};

fn pair(file: &str, diffs: Vec<Difference>) -> FilePairResult {
    FilePairResult::new(file, format!("{file}.expected"), diffs)
}

fn mine(results: Vec<FilePairResult>) -> diffprism_analysis::structural::StructuralAnalysisResult {
    StructuralMiner::with_defaults().mine(&FolderResult::new(results))
}

// ---- Missing and collection-element passes ----

#[test]
fn missing_score_across_result_elements() {
    let result = mine(vec![
        pair("a.json", vec![Difference::removed("Body.Response.Results[0].Score", 5i64)]),
        pair("b.json", vec![Difference::removed("Body.Response.Results[2].Score", 7i64)]),
    ]);

    let pattern = result
        .pattern("collection:Body.Response.Results[*].Score")
        .expect("collection pattern");
    assert_eq!(pattern.file_count, 2);
    assert_eq!(pattern.occurrence_count, 2);
    assert_eq!(pattern.category, DifferenceCategory::CollectionElementMissing);
    assert_eq!(pattern.consistency, 100.0);
    assert_eq!(pattern.parent_path, "Body.Response.Results");
    assert_eq!(pattern.subject_property, "Score");
    assert!(pattern.is_collection_element);
    assert_eq!(result.missing_collection_elements.len(), 1);
    assert!(result.order_differences.is_empty());
}

#[test]
fn missing_only_elements_are_not_an_order_change() {
    let result = mine(vec![pair(
        "a.json",
        vec![
            Difference::removed("Items[0].Name", "pen"),
            Difference::removed("Items[1].Name", "ink"),
        ],
    )]);

    assert!(result.order_differences.is_empty());
    let pattern = result.pattern("collection:Items[*].Name").expect("collection pattern");
    assert_eq!(pattern.occurrence_count, 2);
    assert_eq!(pattern.file_count, 1);
}

#[test]
fn missing_whole_element() {
    let result = mine(vec![pair("a.json", vec![Difference::removed("Order.Lines[4]", "x")])]);
    let pattern = result.pattern("collection:Order.Lines[*]").expect("element pattern");
    assert_eq!(pattern.subject_property, "Lines");
    assert_eq!(pattern.bucket(), PatternBucket::MissingCollectionElements);
}

#[test]
fn missing_plain_property() {
    let result = mine(vec![
        pair("a.json", vec![Difference::added("Customer.Email", "a@b.c")]),
        pair("b.json", vec![Difference::removed("Customer.Email", "d@e.f")]),
    ]);
    let pattern = result.pattern("missing:Customer.Email").expect("missing pattern");
    assert_eq!(pattern.category, DifferenceCategory::PropertyMissing);
    assert_eq!(pattern.file_count, 2);
    assert_eq!(result.missing_properties.len(), 1);
    assert!(result.uncategorized.is_empty());
}

#[test]
fn critical_properties_take_priority() {
    let config = StructuralConfig::default().with_critical_properties(["total"]);
    let miner = StructuralMiner::new(config);
    let result = miner.mine(&FolderResult::new(vec![
        pair("a.json", vec![Difference::removed("Order.Total", 10i64)]),
        pair("b.json", vec![Difference::removed("Order.Total", 12i64)]),
        pair("c.json", vec![Difference::removed("Order.Lines[1].Total", 3i64)]),
    ]));

    let scalar = result.pattern("critical:Order.Total").expect("critical pattern");
    assert!(scalar.is_critical);
    assert_eq!(scalar.category, DifferenceCategory::PropertyMissing);
    assert_eq!(scalar.file_count, 2);

    let nested = result.pattern("critical:Order.Lines[*].Total").expect("critical element pattern");
    assert_eq!(nested.category, DifferenceCategory::CollectionElementMissing);

    assert_eq!(result.critical_missing.len(), 2);
    assert_eq!(result.summary.critical_pattern_count, 2);
    assert!(result.missing_properties.is_empty());
    assert!(result.missing_collection_elements.is_empty());
    assert!(scalar.description.contains("Critical property"));
}

// ---- Order pass ----

#[test]
fn shuffled_elements_form_an_order_pattern() {
    let result = mine(vec![pair(
        "o.json",
        vec![
            Difference::changed("Lines[0].Sku", "ABC-1", "ABC-2"),
            Difference::changed("Lines[1].Sku", "XYZ-9", "XYZ-1"),
        ],
    )]);

    let pattern = result.pattern("order:Lines").expect("order pattern");
    assert_eq!(pattern.category, DifferenceCategory::ElementOrderChanged);
    assert_eq!(pattern.occurrence_count, 2);
    assert_eq!(pattern.path, "Lines");
    assert!(result.uncategorized.is_empty());
    assert_eq!(
        result.file_classification.classification_of("o.json"),
        Some(FileClassification::Order)
    );
}

#[test]
fn one_touched_index_is_not_an_order_change() {
    let result = mine(vec![pair(
        "a.json",
        vec![
            Difference::changed("Customers[0].Name", "Ann", "Ana"),
            Difference::changed("Customers[0].City", "Oslo", "Osaka"),
        ],
    )]);
    assert!(result.order_differences.is_empty());
}

#[test]
fn suffix_guard_leaves_multi_index_collections_alone() {
    let config = StructuralConfig::default().with_order_exclusion_suffixes(["Info"]);
    let miner = StructuralMiner::new(config);
    let result = miner.mine(&FolderResult::new(vec![pair(
        "a.json",
        vec![
            Difference::changed("CustomerInfo[0].Name", "Ann", "Ana"),
            Difference::changed("CustomerInfo[1].Name", "Bob", "Bor"),
        ],
    )]));
    assert!(result.pattern("order:CustomerInfo").is_some());
}

#[test]
fn oversized_indices_still_count_as_positions() {
    let result = mine(vec![pair(
        "a.json",
        vec![
            Difference::changed("Items[1].Sku", "ABC-1", "ABC-2"),
            Difference::changed("Items[99999999999999999999].Sku", "ABC-3", "ABC-4"),
        ],
    )]);
    let pattern = result.pattern("order:Items").expect("order pattern");
    assert_eq!(pattern.occurrence_count, 2);
    assert!(result.uncategorized.is_empty());
}

#[test]
fn leading_zeros_name_the_same_index() {
    let result = mine(vec![pair(
        "a.json",
        vec![
            Difference::changed("Items[01].Sku", "ABC-1", "ABC-2"),
            Difference::changed("Items[1].Sku", "ABC-3", "ABC-4"),
        ],
    )]);
    assert!(result.order_differences.is_empty());
}

// ---- Value passes ----

#[test]
fn recurring_value_transition() {
    let status = |from: &str, to: &str| vec![Difference::changed("Customer.Status", from, to)];
    let result = mine(vec![
        pair("a.json", status("Active", "Inactive")),
        pair("b.json", status("Active", "Inactive")),
        pair("c.json", status("Active", "Inactive")),
        pair("d.json", status("Active", "Pending")),
    ]);

    let recurring = result
        .pattern("value:Customer.Status:Active->Inactive")
        .expect("recurring pattern");
    assert_eq!(recurring.occurrence_count, 3);
    assert_eq!(recurring.category, DifferenceCategory::TextChanged);
    assert_eq!(
        recurring.value_pair,
        Some(("Active".to_string(), "Inactive".to_string()))
    );
    assert_eq!(recurring.consistency, 75.0);

    let general = result.pattern("general:Customer.Status").expect("general pattern");
    assert_eq!(general.occurrence_count, 4);
    assert_eq!(general.file_count, 4);
    assert!(general.description.contains("varies across 4 files"));

    // The lone Active -> Pending change is explained by nothing but the summary view.
    assert_eq!(result.summary.uncategorized_differences, 1);
    let residual = result.pattern("uncategorized").expect("residual pattern");
    assert_eq!(residual.affected_files, BTreeSet::from(["d.json".to_string()]));
}

#[test]
fn single_file_general_description() {
    let result = mine(vec![pair("a.json", vec![Difference::changed("Order.Note", "x", "y")])]);
    let general = result.pattern("general:Order.Note").expect("general pattern");
    assert!(general.description.contains("has differences within this file"));
    assert_eq!(result.uncategorized.len(), 1);
}

#[test]
fn value_category_inference() {
    assert_eq!(infer_value_category("1.5", "2"), DifferenceCategory::NumericChanged);
    assert_eq!(infer_value_category("true", "FALSE"), DifferenceCategory::BooleanChanged);
    assert_eq!(infer_value_category("2024-01-01", "2024/01/02"), DifferenceCategory::DateTimeChanged);
    assert_eq!(infer_value_category("open", "closed"), DifferenceCategory::TextChanged);
}

// ---- Finishing ----

#[test]
fn consistency_rounding_and_zero_denominator() {
    assert_eq!(consistency(1, 3), 33.3);
    assert_eq!(consistency(2, 3), 66.7);
    assert_eq!(consistency(3, 3), 100.0);
    assert_eq!(consistency(3, 0), 0.0);
}

#[test]
fn empty_input_produces_empty_result() {
    let result = mine(vec![pair("same.json", vec![])]);
    assert!(result.is_empty());
    assert_eq!(result.summary.total_file_pairs, 1);
    assert_eq!(result.summary.files_with_differences, 0);
    assert_eq!(result.summary.pattern_count, 0);
    assert!(result.unaccounted_files.is_empty());
}

#[test]
fn examples_are_capped() {
    let results = (0..5)
        .map(|i| pair(&format!("f{i}.json"), vec![Difference::removed("Order.Email", "x")]))
        .collect();
    let result = mine(results);
    let pattern = result.pattern("missing:Order.Email").expect("missing pattern");
    assert_eq!(pattern.occurrence_count, 5);
    assert_eq!(pattern.examples.len(), 3);

    let config = StructuralConfig {
        example_limit: 1,
        ..StructuralConfig::default()
    };
    let results = (0..5)
        .map(|i| pair(&format!("f{i}.json"), vec![Difference::removed("Order.Email", "x")]))
        .collect();
    let result = StructuralMiner::new(config).mine(&FolderResult::new(results));
    assert_eq!(result.pattern("missing:Order.Email").map(|p| p.examples.len()), Some(1));
}

#[test]
fn unequal_pair_without_differences_is_unaccounted() {
    let empty = FilePairResult {
        file1_name: "ghost.json".into(),
        file2_name: "ghost.expected".into(),
        are_equal: false,
        differences: Vec::new(),
    };
    let result = mine(vec![empty, pair("a.json", vec![Difference::removed("X", 1i64)])]);
    assert_eq!(result.unaccounted_files, vec!["ghost.json".to_string()]);
    assert_eq!(result.summary.files_with_differences, 2);
}

#[test]
fn every_difference_file_is_classified_once() {
    let result = mine(vec![
        pair("value.json", vec![Difference::changed("A", "x", "y")]),
        pair("missing.json", vec![Difference::removed("B", 1i64)]),
        pair(
            "mixed.json",
            vec![Difference::changed("A", "x", "y"), Difference::removed("B", 1i64)],
        ),
        pair("equal.json", vec![]),
    ]);

    let breakdown = &result.file_classification;
    assert_eq!(breakdown.classification_of("value.json"), Some(FileClassification::Value));
    assert_eq!(breakdown.classification_of("missing.json"), Some(FileClassification::Missing));
    assert_eq!(breakdown.classification_of("mixed.json"), Some(FileClassification::Mixed));
    assert_eq!(breakdown.classification_of("equal.json"), None);

    let listed: usize = [
        FileClassification::Value,
        FileClassification::Missing,
        FileClassification::Order,
        FileClassification::Mixed,
        FileClassification::Uncategorized,
    ]
    .iter()
    .map(|c| breakdown.files(*c).len())
    .sum();
    assert_eq!(listed, 3);
}

#[test]
fn buckets_are_ranked_by_consistency() {
    let result = mine(vec![
        pair(
            "a.json",
            vec![Difference::removed("A.One", 1i64), Difference::removed("A.Two", 1i64)],
        ),
        pair("b.json", vec![Difference::removed("A.Two", 1i64)]),
    ]);
    let keys: Vec<&str> = result.missing_properties.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["missing:A.Two", "missing:A.One"]);
    assert_eq!(result.summary.bucket_counts.get(&PatternBucket::MissingProperties), Some(&2));
}

// ---- Difference kinds ----

#[test]
fn difference_kinds_follow_the_categorizer() {
    let tol = 10.0;
    assert_eq!(kind_of(&Difference::removed("Order.Email", "a"), tol), DifferenceKind::Missing);
    assert_eq!(kind_of(&Difference::added("Items[2]", "a"), tol), DifferenceKind::Missing);
    assert_eq!(kind_of(&Difference::changed("Order.Total", 1i64, 2.5f64), tol), DifferenceKind::Value);
    assert_eq!(kind_of(&Difference::changed("Order.Note", "x", "y"), tol), DifferenceKind::Value);
    assert_eq!(kind_of(&Difference::changed("Lines[0].Sku", "ABC-1", "ABC-2"), tol), DifferenceKind::Order);
    // Mixed kinds: ValueChanged and CollectionItemChanged are not value transitions.
    assert_eq!(kind_of(&Difference::changed("Order.Total", "7", 7i64), tol), DifferenceKind::Other);
    assert_eq!(kind_of(&Difference::changed("Values[1]", "7", 7i64), tol), DifferenceKind::Other);
}

#[test]
fn both_sides_absent_is_missing() {
    let diff = Difference::new("Order.Email", None, None);
    assert_eq!(kind_of(&diff, 10.0), DifferenceKind::Missing);
    let result = mine(vec![pair("a.json", vec![diff])]);
    assert!(result.pattern("missing:Order.Email").is_some());
    assert!(result.general_value_differences.is_empty());
}

// ---- Reorder heuristic ----

#[test]
fn reorder_heuristic_cases() {
    assert!(is_likely_reorder(&Difference::changed("X[0]", 5i64, 12i64), 10.0));
    assert!(!is_likely_reorder(&Difference::changed("X[0]", 5i64, 30i64), 10.0));
    assert!(is_likely_reorder(&Difference::changed("X[0]", "Alpha1", "Alpha2"), 10.0));
    assert!(!is_likely_reorder(&Difference::changed("X[0]", "Apple", "Apricot"), 10.0));
    assert!(!is_likely_reorder(&Difference::changed("X[0]", "5", 5i64), 10.0));
    assert!(!is_likely_reorder(&Difference::removed("X[0]", 5i64), 10.0));
    assert!(!is_likely_reorder(&Difference::changed("X[0]", true, false), 10.0));
}
