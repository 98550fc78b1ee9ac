//! Logging setup for the `overlay` binary
//!
//! Console output goes to stderr so reports on stdout stay parseable.
//! Filter it with RUST_LOG:
//! - `RUST_LOG=debug` - classification of every scenario
//! - `RUST_LOG=highlight_overlay::overlay=trace` - computed parts per fragment
//!
//! A debug-level copy is appended to `logs/overlay.log` in the config
//! directory, rotated daily.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber.
///
/// `default_level` applies when RUST_LOG is unset. The returned guard
/// flushes the log file when dropped and must be held until exit.
pub fn init(default_level: &str) -> Option<WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let (file_layer, guard) = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let appender = tracing_appender::rolling::daily(logs_dir, "overlay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("warning: file logging disabled: {}", e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}
