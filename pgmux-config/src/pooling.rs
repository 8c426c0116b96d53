use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Prepared statements support.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PreparedStatements {
    Disabled,
    #[default]
    Extended,
}

impl PreparedStatements {
    pub fn enabled(&self) -> bool {
        !matches!(self, PreparedStatements::Disabled)
    }
}

impl FromStr for PreparedStatements {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(Self::Disabled),
            "extended" => Ok(Self::Extended),
            _ => Err(format!("Invalid prepared statements mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_prepared_statements_from_str() {
        assert_eq!(
            "Extended".parse::<PreparedStatements>().unwrap(),
            PreparedStatements::Extended
        );
        assert_eq!(
            "disabled".parse::<PreparedStatements>().unwrap(),
            PreparedStatements::Disabled
        );
        assert!("full".parse::<PreparedStatements>().is_err());
        assert!(!PreparedStatements::Disabled.enabled());
    }
}
