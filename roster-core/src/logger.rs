//! Logging Infrastructure
//!
//! Structured logging setup shared by binaries, demos and tests.

use tracing_subscriber::EnvFilter;

/// Initialize the logger at the default level
pub fn init_logger() {
    init_logger_with_level("info");
}

/// Initialize the logger with an explicit default level.
///
/// `RUST_LOG` wins when set. Safe to call more than once — later calls are
/// no-ops, which lets every test set logging up independently.
pub fn init_logger_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init()
        .ok();
}
