//! Stable error codes surfaced to hosts.

pub const CONFIG_IO: &str = "CONFIG_IO";
pub const CONFIG_PARSE: &str = "CONFIG_PARSE";
pub const CONFIG_INVALID_VALUE: &str = "CONFIG_INVALID_VALUE";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

/// Maps an error to a stable, machine-readable code.
pub trait DiffprismErrorCode {
    fn error_code(&self) -> &'static str;
}
