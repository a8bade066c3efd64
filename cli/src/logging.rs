//! # Logging
//!
//! Installs the `tracing` subscriber for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes logging.
///
/// # Environment
/// - `RUST_LOG`: filter directives (default: `warn`),
///   e.g. `RUST_LOG=autoreconf_core=debug`.
///
/// Output goes to stderr; stdout carries descriptors and reports.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
