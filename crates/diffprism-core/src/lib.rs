//! # diffprism-core
//!
//! Foundation crate for the diffprism difference analysis engine.
//! Defines the input data model, errors, config and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::AnalysisConfig;
pub use errors::error_code::DiffprismErrorCode;
pub use errors::{ConfigError, DiffprismError, DiffprismResult};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::difference::{Difference, FilePairResult, FolderResult, Value};
