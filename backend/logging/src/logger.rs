//! Structured Logger
//!
//! Wraps `tracing` to provide console output plus a daily-rolling NDJSON
//! file, driven by the `[logging]` section of `dharma.toml`.

use dharma_config::LoggingConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix for the rolling log: `<dir>/dharma.log.YYYY-MM-DD`.
const LOG_FILE_PREFIX: &str = "dharma.log";

/// Initialize the global structured logger from config.
/// `RUST_LOG` overrides the configured level when set. Safe to call more
/// than once; later calls are no-ops.
pub fn init_logger(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, LOG_FILE_PREFIX);

    // NDJSON to the file, human-readable to the console.
    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
