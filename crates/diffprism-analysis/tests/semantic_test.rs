//! Semantic grouper tests.

use diffprism_analysis::semantic::{SemanticGroup, SemanticGrouper};
use diffprism_core::config::{DocumentSection, SemanticConfig};
use diffprism_core::{Difference, FilePairResult};

fn pair(file: &str, diffs: Vec<Difference>) -> FilePairResult {
    FilePairResult::new(file, format!("{file}.expected"), diffs)
}

fn group_of(diff: Difference) -> Option<String> {
    SemanticGrouper::with_defaults().group_name_for(&diff)
}

// ---- Rule order ----

#[test]
fn status_wins_over_later_rules() {
    assert_eq!(
        group_of(Difference::changed("Customer.Status", "Active", "Inactive")).as_deref(),
        Some("Status Changes")
    );
}

#[test]
fn named_predicates() {
    let cases = [
        (Difference::changed("Order.CustomerId", "c-1", "c-2"), "ID Value Changes"),
        (Difference::changed("Order.ShipDate", "monday", "tuesday"), "Date/Time Changes"),
        (Difference::changed("Order.Amount", "ten", "eleven"), "Score/Value Adjustments"),
        (Difference::changed("Order.Weight", 1i64, 2.5f64), "Score/Value Adjustments"),
        (Difference::changed("Product.Title", "Pen", "Ink"), "Name/Description Changes"),
        (Difference::changed("Product.Label", "Pen", "Ink"), "Name/Description Changes"),
        (Difference::changed("Tags[0]", "alpha1", "alpha2"), "Collection Order Differences"),
        (Difference::changed("Tags[0]", "alpha", "beta"), "Tag Modifications"),
    ];
    for (diff, expected) in cases {
        let path = diff.property_path.clone();
        assert_eq!(group_of(diff).as_deref(), Some(expected), "path {path}");
    }
}

#[test]
fn document_sections_follow_predicates() {
    assert_eq!(
        group_of(Difference::changed("Header.Sender", "a", "b")).as_deref(),
        Some("Header Changes")
    );
    assert_eq!(
        group_of(Difference::changed("Body.Paging.Cursor", "a", "b")).as_deref(),
        Some("Metadata Changes")
    );
}

#[test]
fn custom_sections_replace_defaults() {
    let config = SemanticConfig {
        sections: vec![DocumentSection::new("Audit Trail", "Audit entries differ", ["audit"])],
        ..SemanticConfig::default()
    };
    let grouper = SemanticGrouper::new(config);
    assert_eq!(
        grouper
            .group_name_for(&Difference::changed("Doc.AUDIT.Actor", "a", "b"))
            .as_deref(),
        Some("Audit Trail")
    );
    assert_eq!(grouper.group_name_for(&Difference::changed("Header.Sender", "a", "b")), None);
}

#[test]
fn value_shapes_come_last() {
    assert_eq!(
        group_of(Difference::changed(
            "Doc.Ref",
            "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
            "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}"
        ))
        .as_deref(),
        Some("Identifier Replacements")
    );
    assert_eq!(
        group_of(Difference::changed("Doc.Link", "http://a/x", "http://a/y")).as_deref(),
        Some("URL/Path Changes")
    );
    assert_eq!(
        group_of(Difference::changed("Lib.Release", "1.2.3", "v1.3")).as_deref(),
        Some("Version Changes")
    );
}

#[test]
fn unmatched_differences_stay_ungrouped() {
    assert_eq!(group_of(Difference::changed("Misc.Blob", "x", "y")), None);
    assert_eq!(group_of(Difference::removed("Lib.Release", "1.2.3")), None);
}

// ---- Confidence ----

#[test]
fn confidence_formula() {
    assert_eq!(SemanticGroup::confidence_for(0, 0), 50);
    assert_eq!(SemanticGroup::confidence_for(1, 1), 60);
    assert_eq!(SemanticGroup::confidence_for(3, 2), 75);
    assert_eq!(SemanticGroup::confidence_for(10, 5), 100);
    assert_eq!(SemanticGroup::confidence_for(40, 40), 100);
}

// ---- Whole analysis ----

#[test]
fn analysis_groups_sorts_and_counts() {
    let results = vec![
        pair("a.json", vec![Difference::changed("Customer.Status", "Active", "Inactive")]),
        pair(
            "b.json",
            vec![
                Difference::changed("Customer.Status", "Active", "Inactive"),
                Difference::changed("Tags[0]", "alpha", "beta"),
            ],
        ),
        pair("c.json", vec![Difference::changed("Order.State", "new", "old")]),
        pair("d.json", vec![Difference::changed("Misc.Blob", "x", "y")]),
        pair("same.json", vec![]),
    ];
    let analysis = SemanticGrouper::with_defaults().analyze(&results);

    assert_eq!(analysis.total_differences, 5);
    assert_eq!(analysis.categorized_differences, 4);
    assert_eq!(analysis.uncategorized_differences, 1);
    assert!((analysis.categorized_ratio - 0.8).abs() < 1e-9);

    let status = analysis.group("Status Changes").expect("status group");
    assert_eq!(status.differences.len(), 3);
    assert_eq!(status.affected_files.len(), 3);
    assert_eq!(status.related_properties.len(), 2);
    assert_eq!(status.confidence_level, 75);

    let tags = analysis.group("Tag Modifications").expect("tag group");
    assert_eq!(tags.related_properties.iter().next().map(String::as_str), Some("Tags[*]"));
    assert_eq!(tags.confidence_level, 60);

    assert_eq!(analysis.groups[0].name, "Status Changes");
    assert!(analysis
        .groups
        .windows(2)
        .all(|w| w[0].confidence_level >= w[1].confidence_level));
}

#[test]
fn each_difference_joins_at_most_one_group() {
    let results = vec![pair(
        "a.json",
        vec![
            Difference::changed("Header.StatusId", "1", "2"),
            Difference::changed("Header.Sender", "a", "b"),
        ],
    )];
    let analysis = SemanticGrouper::with_defaults().analyze(&results);
    let grouped: usize = analysis.groups.iter().map(|g| g.differences.len()).sum();
    assert_eq!(grouped, analysis.categorized_differences);
    assert_eq!(grouped, 2);
}

#[test]
fn no_differences_means_zero_ratio() {
    let analysis = SemanticGrouper::with_defaults().analyze(&[pair("same.json", vec![])]);
    assert!(analysis.groups.is_empty());
    assert_eq!(analysis.categorized_ratio, 0.0);
}
