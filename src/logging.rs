//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence; otherwise the service logs at `info`, or at
//! `debug` for this crate when verbose.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,stickers=debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!(verbose, "logging initialized");
    }
}
