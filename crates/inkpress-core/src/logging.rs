//! Logging initialization for the client.
//!
//! All crates in the workspace log through `tracing`; this module wires up a
//! `tracing-subscriber` with an env-filter so `RUST_LOG` can override the
//! configured default level at runtime.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging system.
///
/// # Arguments
///
/// * `level` - Default log level (trace, debug, info, warn, error), used when
///   `RUST_LOG` is not set.
///
/// # Example
///
/// ```ignore
/// init_logging("info");
/// tracing::info!("Client started");
/// ```
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let json_output = std::env::var("INKPRESS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt().with_env_filter(filter).with_target(true);

    // try_init so tests that initialize more than once don't panic
    if json_output {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
