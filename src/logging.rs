//! Logging setup
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! embedding application's call. [`init_logging`] is a convenience for
//! binaries and tests that want the stock `fmt` subscriber.

use crate::config::LoggingConfig;

/// Initialize the global `fmt` subscriber from a logging configuration
///
/// # Arguments
/// * `config` - Level and timestamp settings
///
/// # Returns
/// `true` if this call installed the subscriber, `false` if one was
/// already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let level = config.level.to_tracing_level();

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    if config.timestamps {
        subscriber.try_init().is_ok()
    } else {
        subscriber.without_time().try_init().is_ok()
    }
}
