//! Tracing initialization.
//!
//! The library logs through `tracing` macros everywhere; the embedding
//! binary calls [`init`] once to install a formatted subscriber with an
//! env-filter directive (`RUST_LOG` still wins when set).

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `default_filter` is used when `RUST_LOG` is not set, e.g. `"info"` or
/// `"routepilot=debug"`. Calling this twice is a no-op rather than a
/// panic, which keeps tests that share a process harmless.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
