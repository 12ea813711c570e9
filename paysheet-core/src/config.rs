//! Application configuration.
//!
//! Read from a TOML file; every field has a default so a missing file (or
//! a file that only overrides one table) still produces a working setup.
//!
//! ```toml
//! policy = "extended"
//! sheet_path = "folha_pagamento.csv"
//!
//! [rates]
//! gerente = 160
//! atendente = 120
//!
//! [fixed_employees]
//! eddie = "cozinha"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{FixedEmployees, PayPolicy, RateTable};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the application is parameterized on: the calculation policy,
/// the sheet location, and the two reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaysheetConfig {
    pub policy: PayPolicy,
    pub sheet_path: PathBuf,
    pub rates: RateTable,
    pub fixed_employees: FixedEmployees,
}

impl Default for PaysheetConfig {
    fn default() -> Self {
        Self {
            policy: PayPolicy::Simple,
            sheet_path: PathBuf::from("paysheet.csv"),
            rates: RateTable::default(),
            fixed_employees: FixedEmployees::builtin(),
        }
    }
}

impl PaysheetConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load the config file at `path`. A missing file yields the defaults;
    /// an existing file that cannot be read or parsed is an error rather
    /// than a silent fallback.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_carry_the_builtin_tables() {
        let config = PaysheetConfig::default();

        assert_eq!(config.policy, PayPolicy::Simple);
        assert_eq!(config.sheet_path, PathBuf::from("paysheet.csv"));
        assert_eq!(config.rates.daily_rate("seguranca"), Some(dec!(130)));
        assert_eq!(config.fixed_employees.resolve("anchieta", "bar"), "churrasqueiro");
    }

    #[test]
    fn empty_toml_is_the_default_config() {
        let config = PaysheetConfig::from_toml_str("").unwrap();

        assert_eq!(config, PaysheetConfig::default());
    }

    #[test]
    fn toml_overrides_replace_whole_tables() {
        let config = PaysheetConfig::from_toml_str(
            r#"
policy = "extended"
sheet_path = "folha.csv"

[rates]
bar = 210.50

[fixed_employees]
"Nova Pessoa" = "bar"
"#,
        )
        .unwrap();

        assert_eq!(config.policy, PayPolicy::Extended);
        assert_eq!(config.sheet_path, PathBuf::from("folha.csv"));
        assert_eq!(config.rates.daily_rate("bar"), Some(dec!(210.50)));
        // The rates table is replaced, not merged.
        assert_eq!(config.rates.daily_rate("gerente"), None);
        // Override keys are normalized on load.
        assert_eq!(config.fixed_employees.resolve("  nova  pessoa ", "cozinha"), "bar");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = PaysheetConfig::from_toml_str("polcy = \"simple\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_policy_value_is_a_parse_error() {
        let result = PaysheetConfig::from_toml_str("policy = \"fancy\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
