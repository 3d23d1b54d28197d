//! Runtime setup for the command line
//!
//! Logging goes to stderr so stdout carries only progress lines and the
//! final error message read by the front-end.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "simgraph=warn",
        1 => "simgraph=info",
        2 => "simgraph=debug",
        _ => "simgraph=trace",
    }
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();

    if let Err(e) = result {
        // Already configured (tests, embedding)
        eprintln!("Note: Logging already configured: {}", e);
    }
}
