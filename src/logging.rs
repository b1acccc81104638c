//! Diagnostic logging setup.
//!
//! User-facing lines (issues, warnings, `Wrote:`) are printed directly by the
//! binaries; `tracing` carries the debug trail behind `--verbose`.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins when set; otherwise the
/// level is `debug` with `verbose` and `warn` without.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
