//! Configuration.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use tracing::info;

pub use pgmux_config::{Config, Error, General, LogFormat, PreparedStatements};

static CONFIG: Lazy<ArcSwap<Config>> = Lazy::new(|| ArcSwap::from_pointee(Config::default()));

/// Current configuration.
pub fn config() -> Arc<Config> {
    CONFIG.load().clone()
}

/// Load the configuration file from disk.
pub fn load(path: impl AsRef<Path>) -> Result<Arc<Config>, Error> {
    let config = Config::load(path)?;
    set(config)
}

/// Replace the configuration.
pub fn set(config: Config) -> Result<Arc<Config>, Error> {
    config.check()?;
    info!(
        "prepared statements: {:?}, limit: {}",
        config.general.prepared_statements, config.general.prepared_statements_limit
    );
    let config = Arc::new(config);
    CONFIG.store(config.clone());
    Ok(config)
}
