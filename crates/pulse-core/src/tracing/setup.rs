//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "PULSE_LOG";

/// Filter used when `PULSE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "pulse=info";

/// Initialize the Pulse tracing/logging system.
///
/// Reads `PULSE_LOG` for per-module log levels.
/// Format: `PULSE_LOG=pulse_analytics=debug,pulse_core=warn`
///
/// Idempotent: only the first call installs a subscriber. A subscriber
/// installed elsewhere first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
