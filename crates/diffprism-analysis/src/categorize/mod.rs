//! Difference categorization: the closed taxonomy and the rules assigning it.

pub mod categorizer;
pub mod taxonomy;

pub use categorizer::{categorize, categorize_enhanced};
pub use taxonomy::{DifferenceCategory, EnhancedCategory};
