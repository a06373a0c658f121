//! Semantic grouping into human-facing themes.

pub mod grouper;
pub mod rules;
pub mod types;

pub use grouper::SemanticGrouper;
pub use types::{SemanticDifferenceAnalysis, SemanticGroup};
