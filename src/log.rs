// src/log.rs
//! Logging front door.
//!
//! Library code logs through `logf!` / `logd!` / `loge!`, which emit `tracing`
//! events under the crate target. Nothing is printed unless a subscriber is
//! installed; the binary does that with [`init`].

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "school_scrape", $($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "school_scrape", $($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!(target: "school_scrape", $($arg)*)
    };
}

/// Install the stderr subscriber. Filter comes from `SCHOOL_SCRAPE_LOG` when set,
/// otherwise `info` (or `debug` with `verbose`).
/// Timestamps are elapsed-since-start, like the old debug.log lines.
#[cfg(feature = "cli")]
pub fn init(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    use crate::config::consts::LOG_ENV;

    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = fmt()
        .with_env_filter(filter)
        .with_timer(fmt::time::uptime())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
