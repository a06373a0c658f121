//! Path normalization. The single source of structural path keys.

pub mod normalizer;

pub use normalizer::{
    element_position, ends_with_index, has_index, is_attribute_path, last_segment, normalize,
    parent_path, split_collection, ElementPosition, WILDCARD,
};
