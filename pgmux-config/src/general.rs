use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use super::pooling::PreparedStatements;

/// Settings that apply to every client and server connection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct General {
    /// Enables support for prepared statements.
    ///
    /// _Default:_ `extended`
    #[serde(default = "General::prepared_statements")]
    pub prepared_statements: PreparedStatements,

    /// Number of prepared statements that will be allowed for each server connection.
    ///
    /// **Note:** If this limit is reached, the least recently used statement is closed
    /// on the server and replaced with the newest one.
    ///
    /// _Default:_ `100`
    #[serde(default = "General::prepared_statements_limit")]
    pub prepared_statements_limit: usize,

    /// Log output format.
    ///
    /// _Default:_ `text`
    #[serde(default = "General::log_format")]
    pub log_format: LogFormat,
}

impl Default for General {
    fn default() -> Self {
        Self {
            prepared_statements: Self::prepared_statements(),
            prepared_statements_limit: Self::prepared_statements_limit(),
            log_format: Self::log_format(),
        }
    }
}

impl General {
    fn env_or_default<T: FromStr>(env_var: &str, default: T) -> T {
        env::var(env_var)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn env_enum_or_default<T: FromStr + Default>(env_var: &str) -> T {
        env::var(env_var)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    fn prepared_statements() -> PreparedStatements {
        Self::env_enum_or_default("PGMUX_PREPARED_STATEMENTS")
    }

    pub fn prepared_statements_limit() -> usize {
        Self::env_or_default("PGMUX_PREPARED_STATEMENTS_LIMIT", 100)
    }

    fn log_format() -> LogFormat {
        Self::env_enum_or_default("PGMUX_LOG_FORMAT")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}
