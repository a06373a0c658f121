use super::error_code::{self, DiffprismErrorCode};
use super::ConfigError;

/// Top-level error type for diffprism.
/// Subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum DiffprismError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias.
pub type DiffprismResult<T> = Result<T, DiffprismError>;

impl DiffprismErrorCode for DiffprismError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}
