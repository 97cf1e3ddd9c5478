//! Tracing subscriber setup for the binary.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Installs a global fmt subscriber once.  `RUST_LOG` takes precedence
/// over `default_directive` when set.
pub fn init_tracing(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        // Another subscriber may already be installed by an embedding app.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init_tracing("purchase_engine=debug");
        super::init_tracing("purchase_engine=info");
    }
}
