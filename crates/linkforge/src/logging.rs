//! Tracing subscriber setup.
//!
//! Preparation reports progress as `tracing` events with an `event` field
//! (`prepare_start`, `disjuncts_built`, `prepare_end`, ...). Applications
//! that already install a subscriber need nothing from this module.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "linkforge_prepare=info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call multiple times - only the first call has effect. If another
/// subscriber is already installed it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();
    });
}

/// Returns true once [`init`] has run.
pub fn is_initialized() -> bool {
    INIT.get().is_some()
}
