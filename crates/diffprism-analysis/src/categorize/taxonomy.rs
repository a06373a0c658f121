//! Category taxonomy shared by the categorizer and the structural miner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag assigned to a single difference or to an aggregated pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifferenceCategory {
    TextChanged,
    NumericChanged,
    DateTimeChanged,
    BooleanChanged,
    CollectionItemChanged,
    ItemAdded,
    ItemRemoved,
    /// One side absent at a property position.
    NullValueChange,
    ValueChanged,
    /// A path changes across files regardless of the concrete values.
    GeneralValueChanged,
    UncategorizedDifference,
    /// Pattern kind: a property absent on one side.
    PropertyMissing,
    /// Pattern kind: a property absent inside collection elements.
    CollectionElementMissing,
    /// Pattern kind: collection elements appear reordered.
    ElementOrderChanged,
}

impl DifferenceCategory {
    pub const ALL: [DifferenceCategory; 14] = [
        Self::TextChanged,
        Self::NumericChanged,
        Self::DateTimeChanged,
        Self::BooleanChanged,
        Self::CollectionItemChanged,
        Self::ItemAdded,
        Self::ItemRemoved,
        Self::NullValueChange,
        Self::ValueChanged,
        Self::GeneralValueChanged,
        Self::UncategorizedDifference,
        Self::PropertyMissing,
        Self::CollectionElementMissing,
        Self::ElementOrderChanged,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TextChanged => "text_changed",
            Self::NumericChanged => "numeric_changed",
            Self::DateTimeChanged => "date_time_changed",
            Self::BooleanChanged => "boolean_changed",
            Self::CollectionItemChanged => "collection_item_changed",
            Self::ItemAdded => "item_added",
            Self::ItemRemoved => "item_removed",
            Self::NullValueChange => "null_value_change",
            Self::ValueChanged => "value_changed",
            Self::GeneralValueChanged => "general_value_changed",
            Self::UncategorizedDifference => "uncategorized_difference",
            Self::PropertyMissing => "property_missing",
            Self::CollectionElementMissing => "collection_element_missing",
            Self::ElementOrderChanged => "element_order_changed",
        }
    }

    /// Concrete value-transition kinds (both sides present, same shape).
    pub fn is_value_change(&self) -> bool {
        matches!(
            self,
            Self::TextChanged
                | Self::NumericChanged
                | Self::DateTimeChanged
                | Self::BooleanChanged
                | Self::ValueChanged
        )
    }

    /// Kinds describing an absent side.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::NullValueChange
                | Self::ItemAdded
                | Self::ItemRemoved
                | Self::PropertyMissing
                | Self::CollectionElementMissing
        )
    }
}

impl fmt::Display for DifferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-name-aware tag from [`categorize_enhanced`](super::categorize_enhanced).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnhancedCategory {
    IdentifierMismatch,
    NameValueChange,
    DescriptionChange,
    StatusValueChange,
    TimestampChange,
    QuantityChange,
    AmountValueChange,
    BooleanFlagChange,
    XmlAttributeMissing,
    XmlAttributeValueChanged,
    /// No field-name rule applied; the type-based category.
    Base(DifferenceCategory),
}

impl EnhancedCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::IdentifierMismatch => "identifier_mismatch",
            Self::NameValueChange => "name_value_change",
            Self::DescriptionChange => "description_change",
            Self::StatusValueChange => "status_value_change",
            Self::TimestampChange => "timestamp_change",
            Self::QuantityChange => "quantity_change",
            Self::AmountValueChange => "amount_value_change",
            Self::BooleanFlagChange => "boolean_flag_change",
            Self::XmlAttributeMissing => "xml_attribute_missing",
            Self::XmlAttributeValueChanged => "xml_attribute_value_changed",
            Self::Base(category) => category.name(),
        }
    }

    /// The type-based category when no richer tag applied.
    pub fn base(&self) -> Option<DifferenceCategory> {
        match self {
            Self::Base(category) => Some(*category),
            _ => None,
        }
    }
}

impl fmt::Display for EnhancedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
