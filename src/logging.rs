//! Tracing setup for the `quotebook` binary.
//!
//! The library only emits events; installing a subscriber is left to the
//! binary. `RUST_LOG` overrides the default `info` filter, e.g.
//! `RUST_LOG=quotebook=debug quotebook serve`.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. Safe to call more than once.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
