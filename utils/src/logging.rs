//! Structured logging initialization via `tracing`.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering. Idempotent:
/// repeat calls (every test in a binary sets up its own harness) are no-ops,
/// and a subscriber installed elsewhere is left in place.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
        tracing::debug!("tracing initialized");
    });
}
