//! Configuration validation.
//!
//! Semantic checks run after serde has handled syntax. All violations are
//! collected so a broken file is reported in one pass.

use crate::config::schema::NodeConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning every violation found.
pub fn validate_config(config: &NodeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.rpc.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "rpc.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "rpc.url",
            format!("invalid URL '{}': {}", config.rpc.url, e),
        )),
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.timeout_secs", "must be greater than 0"));
    }

    // A retry without a pause would hammer a failing node.
    if config.retries.delay_ms == 0 {
        errors.push(ValidationError::new("retries.delay_ms", "must be greater than 0"));
    }

    if config.retries.max_delay_ms < config.retries.delay_ms {
        errors.push(ValidationError::new(
            "retries.max_delay_ms",
            "must not be smaller than retries.delay_ms",
        ));
    }

    if config.chain.recharge_window_secs == 0 {
        errors.push(ValidationError::new(
            "chain.recharge_window_secs",
            "must be greater than 0",
        ));
    }

    if config.blocks.batch_size == 0 {
        errors.push(ValidationError::new("blocks.batch_size", "must be greater than 0"));
    }

    if chrono::FixedOffset::east_opt(config.display.utc_offset_secs).is_none() {
        errors.push(ValidationError::new(
            "display.utc_offset_secs",
            "must be within +/- 86399 seconds",
        ));
    }

    if !matches!(config.observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}'", config.observability.log_format),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
