//! Process-wide tracing setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,server=debug,services=debug,db=debug,tower_http=info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true))
        .try_init();
}
