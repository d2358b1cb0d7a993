//! Tracing subscriber setup for the binary. Library code only emits
//! events; installing a subscriber is the application's job.

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging, honoring `RUST_LOG` with an `info` default.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
