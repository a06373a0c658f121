//! Difference categorizer tests.

use chrono::{TimeZone, Utc};
use diffprism_analysis::categorize::{categorize, categorize_enhanced, DifferenceCategory, EnhancedCategory};
use diffprism_core::{Difference, Value};

fn ts(day: u32) -> Value {
    Value::Timestamp(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
}

// ---- Type-based precedence ----

#[test]
fn absent_side_is_null_value_change() {
    assert_eq!(categorize(&Difference::removed("Customer.Email", "a@b.c")), DifferenceCategory::NullValueChange);
    assert_eq!(categorize(&Difference::added("Customer.Email", "a@b.c")), DifferenceCategory::NullValueChange);
}

#[test]
fn absent_element_is_item_added_or_removed() {
    assert_eq!(categorize(&Difference::added("Items[3]", "x")), DifferenceCategory::ItemAdded);
    assert_eq!(categorize(&Difference::removed("Items[3]", "x")), DifferenceCategory::ItemRemoved);
    // A property inside an element is a property position, not an element position.
    assert_eq!(categorize(&Difference::removed("Items[3].Name", "x")), DifferenceCategory::NullValueChange);
}

#[test]
fn same_type_values() {
    assert_eq!(categorize(&Difference::changed("Total", 1i64, 2.5f64)), DifferenceCategory::NumericChanged);
    assert_eq!(
        categorize(&Difference::new("Created", Some(ts(1)), Some(ts(2)))),
        DifferenceCategory::DateTimeChanged
    );
    assert_eq!(categorize(&Difference::changed("Name", "a", "b")), DifferenceCategory::TextChanged);
    assert_eq!(categorize(&Difference::changed("Active", true, false)), DifferenceCategory::BooleanChanged);
}

#[test]
fn type_rules_win_over_element_position() {
    assert_eq!(categorize(&Difference::changed("Tags[0]", "a", "b")), DifferenceCategory::TextChanged);
}

#[test]
fn mixed_types_at_element_position() {
    assert_eq!(
        categorize(&Difference::changed("Values[1]", "7", 7i64)),
        DifferenceCategory::CollectionItemChanged
    );
}

#[test]
fn mixed_types_elsewhere_are_generic() {
    assert_eq!(categorize(&Difference::changed("Amount", "7", 7i64)), DifferenceCategory::ValueChanged);
    assert_eq!(
        categorize(&Difference::new("Blob", Some(Value::Other("x".into())), Some(Value::Other("y".into())))),
        DifferenceCategory::ValueChanged
    );
}

// ---- Enhanced, field-name aware ----

#[test]
fn status_field_is_status_value_change() {
    let diff = Difference::changed("Customer.Status", "Active", "Inactive");
    assert_eq!(categorize_enhanced(&diff), EnhancedCategory::StatusValueChange);
    assert_eq!(categorize(&diff), DifferenceCategory::TextChanged);
}

#[test]
fn field_name_shapes() {
    let cases = [
        ("Order.CustomerId", EnhancedCategory::IdentifierMismatch),
        ("Order.id", EnhancedCategory::IdentifierMismatch),
        ("Order.external_id", EnhancedCategory::IdentifierMismatch),
        ("Order.DisplayName", EnhancedCategory::NameValueChange),
        ("Order.Description", EnhancedCategory::DescriptionChange),
        ("Order.State", EnhancedCategory::StatusValueChange),
        ("Order.ShipDate", EnhancedCategory::TimestampChange),
        ("Order.Quantity", EnhancedCategory::QuantityChange),
        ("Order.TotalPrice", EnhancedCategory::AmountValueChange),
        ("Order.IsGift", EnhancedCategory::BooleanFlagChange),
        ("Order.ShippingEnabled", EnhancedCategory::BooleanFlagChange),
    ];
    for (path, expected) in cases {
        let diff = Difference::changed(path, "a", "b");
        assert_eq!(categorize_enhanced(&diff), expected, "path {path}");
    }
}

#[test]
fn paid_is_not_an_identifier() {
    let diff = Difference::changed("Invoice.Paid", "x", "y");
    assert_eq!(categorize_enhanced(&diff), EnhancedCategory::Base(DifferenceCategory::TextChanged));
}

#[test]
fn temporal_values_are_timestamps_whatever_the_name() {
    let diff = Difference::new("Order.Placed", Some(ts(1)), Some(ts(5)));
    assert_eq!(categorize_enhanced(&diff), EnhancedCategory::TimestampChange);
}

#[test]
fn attribute_paths() {
    assert_eq!(
        categorize_enhanced(&Difference::removed("Order.@currency", "EUR")),
        EnhancedCategory::XmlAttributeMissing
    );
    assert_eq!(
        categorize_enhanced(&Difference::changed("Order.@currency", "EUR", "USD")),
        EnhancedCategory::XmlAttributeValueChanged
    );
}

#[test]
fn missing_named_fields_fall_back_to_base() {
    let diff = Difference::removed("Customer.Status", "Active");
    assert_eq!(
        categorize_enhanced(&diff),
        EnhancedCategory::Base(DifferenceCategory::NullValueChange)
    );
    assert_eq!(categorize_enhanced(&diff).base(), Some(DifferenceCategory::NullValueChange));
}
