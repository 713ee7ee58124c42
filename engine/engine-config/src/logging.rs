//! Tracing subscriber setup shared by binaries and test harnesses.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global `fmt` subscriber filtered at `level`.
///
/// `RUST_LOG`, when set, takes precedence over `level`. Returns `false` if a
/// global subscriber was already installed, so calling this twice is harmless.
pub fn init_tracing(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .is_ok()
}
