//! Structural pattern mining: multi-pass aggregation of differences into
//! scored patterns, plus per-file classification and coverage diagnostics.

pub mod accumulator;
pub mod classification;
mod describe;
pub mod miner;
mod missing;
pub mod order;
mod prepared;
pub mod types;
pub mod values;

pub use accumulator::{PatternAccumulator, PatternSeed};
pub use miner::StructuralMiner;
pub use order::is_likely_reorder;
pub use types::{
    FileClassification, FileClassificationBreakdown, FileClassificationDetail, FileKindCounts,
    PatternBucket, StructuralAnalysisResult, StructuralPattern, StructuralSummary,
};
pub use values::infer_value_category;
