//! Diagnostic logging on stderr.
//!
//! The per-file event stream shown to the user goes through a
//! [`LogSink`](crate::sink::LogSink); this subscriber only carries internal
//! diagnostics.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter directive for a verbosity level.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "auto_analyzer=error";
    }
    match verbose {
        0 => "auto_analyzer=warn",
        1 => "auto_analyzer=info",
        _ => "auto_analyzer=debug",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity flags.
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
