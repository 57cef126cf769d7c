//! Logging utilities

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initialize the logging system from `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize logging with a default level, still overridable by `RUST_LOG`
pub fn init_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
