//! # diffprism-analysis
//!
//! Difference pattern analysis engine for diffprism.
//! Contains path normalization, categorization, structural pattern mining,
//! semantic grouping and MinHash similarity clustering.

pub mod categorize;
pub mod clustering;
pub mod paths;
pub mod pipeline;
pub mod semantic;
pub mod structural;

pub use pipeline::{AnalysisReport, DifferenceAnalyzer};
