// logscrub/src/logger.rs
//! Logger setup for the CLI. Honors `RUST_LOG` unless an explicit level
//! override (from `--quiet`/`--debug`) is given.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger. Safe to call more than once (subsequent
/// calls are no-ops), which keeps integration tests from tripping over the
/// one-time init.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp_secs();
    let _ = builder.try_init();
}
