//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so report output on stdout stays clean.
//! `RUST_LOG` overrides the verbosity flag.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level for a `-v` count: 0 warn, 1 debug, 2+ trace.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Call once.
pub fn init(verbosity: u8) {
    let level = level_for(verbosity).as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,faang_validator={level},faang_validate={level}",
            level = level
        ))
    });

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}
