pub mod error_code;
mod config_error;
mod diffprism_error;

pub use config_error::ConfigError;
pub use diffprism_error::{DiffprismError, DiffprismResult};
