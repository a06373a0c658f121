//! Tracing setup shared by every host embedding the engine.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "DIFFPRISM_LOG";

/// Install a fmt subscriber filtered by `DIFFPRISM_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops when a global
/// subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
