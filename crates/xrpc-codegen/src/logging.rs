//! Log setup for the plugin binary
//!
//! stdout carries the protoc response, so all logging goes to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`XRPC_LOG=debug`)
pub const LOG_ENV: &str = "XRPC_LOG";

const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
