//! Tracing subscriber setup for the binary.
//!
//! Library code only emits `tracing` events; nothing is printed until a
//! subscriber is installed here.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Safe to call multiple times; only
/// the first call has effect.
pub fn init(default_filter: &str) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        // A subscriber installed elsewhere (tests, embedding app) takes precedence.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
