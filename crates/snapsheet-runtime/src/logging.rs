#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! Filter directives come from `SNAPSHEET_LOG` (same syntax as `RUST_LOG`),
//! falling back to [`DEFAULT_DIRECTIVE`].

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "SNAPSHEET_LOG";

/// Directive used when `SNAPSHEET_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "snapsheet_core=info,snapsheet_runtime=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a human-readable fmt subscriber as the global default.
pub fn init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter())
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}

/// Install a JSON-lines subscriber as the global default.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .try_init()
}
