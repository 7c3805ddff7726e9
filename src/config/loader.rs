//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::NodeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides the RPC endpoint.
pub const API_URL_ENV_VAR: &str = "API_URL";
/// Overrides the retry ceiling.
pub const MAX_RETRY_ENV_VAR: &str = "MAX_RETRY";
/// Overrides the pause between retries.
pub const RETRY_DELAY_ENV_VAR: &str = "RETRY_DELAY_MS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value '{}' for environment variable {}", value, var)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: defaults, then the optional TOML file, then environment
/// overrides. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<NodeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => NodeConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut NodeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV_VAR) {
        config.rpc.url = url;
    }

    if let Some(value) = lookup(MAX_RETRY_ENV_VAR) {
        config.retries.max_retries = value.trim().parse().map_err(|_| ConfigError::Env {
            var: MAX_RETRY_ENV_VAR,
            value,
        })?;
    }

    if let Some(value) = lookup(RETRY_DELAY_ENV_VAR) {
        config.retries.delay_ms = value.trim().parse().map_err(|_| ConfigError::Env {
            var: RETRY_DELAY_ENV_VAR,
            value,
        })?;
    }

    Ok(())
}
