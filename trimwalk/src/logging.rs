//! Development-time tracing for debugging the walker.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, output to stderr.
//!   Never mixed into trimmed document output.
//!
//! - **Command output**: trimmed documents go to stdout (or back to the
//!   source file with `--in-place`), unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// Safe to call more than once; later calls are no-ops.
///
/// # Example
/// ```bash
/// RUST_LOG=trimwalk=debug trimwalk trim config.json
/// ```
pub fn init() {
    init_with_default("warn");
}

/// Like [`init`], but with a caller-chosen filter when `RUST_LOG` is unset.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
