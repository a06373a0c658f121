//! Configuration loading and validation errors.

use std::path::PathBuf;

use super::error_code::{self, DiffprismErrorCode};

/// Errors that can occur while loading or validating an [`AnalysisConfig`](crate::AnalysisConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl DiffprismErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CONFIG_IO,
            Self::Parse(_) => error_code::CONFIG_PARSE,
            Self::InvalidValue { .. } => error_code::CONFIG_INVALID_VALUE,
        }
    }
}
