//! Logging setup.

use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogFormat;

/// Install the global subscriber. Log level is controlled by `RUST_LOG`.
///
/// Calling this more than once is harmless; only the first call
/// installs a subscriber.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let result = match format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(std::io::stderr().is_terminal())
                .with_file(false);
            tracing_subscriber::registry()
                .with(layer)
                .with(filter)
                .try_init()
        }

        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!("pgmux v{}", env!("CARGO_PKG_VERSION"));
    }
}
