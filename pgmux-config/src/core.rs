use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use super::error::Error;
use super::general::General;

/// Configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General configuration.
    #[serde(default)]
    pub general: General,
}

impl Config {
    /// Load configuration from disk, or use defaults if the file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let config = match read_to_string(path) {
            Ok(config) => {
                let config: Config = toml::from_str(&config)?;
                info!("loaded \"{}\"", path.display());
                config
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "\"{}\" doesn't exist, loading defaults instead",
                    path.display()
                );
                Config::default()
            }
            Err(err) => return Err(err.into()),
        };

        config.check()?;

        Ok(config)
    }

    /// Validate settings that serde can't.
    pub fn check(&self) -> Result<(), Error> {
        if self.general.prepared_statements_limit == 0 {
            return Err(Error::InvalidLimit);
        }

        Ok(())
    }
}
