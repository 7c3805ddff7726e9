//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default public node used when no endpoint is configured.
pub const DEFAULT_RPC_URL: &str = "https://api.steemit.com";

/// Root configuration for the node client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NodeConfig {
    /// JSON-RPC endpoint settings.
    pub rpc: RpcConfig,

    /// Retry policy applied to every remote call.
    pub retries: RetryConfig,

    /// Chain economics used by the resource calculators.
    pub chain: ChainConfig,

    /// Block range fetching discipline.
    pub blocks: BlockFetchConfig,

    /// Rendering of block timestamps.
    pub display: DisplayConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Base URL of the node (e.g., "https://api.steemit.com").
    pub url: String,

    /// Timeout for a single request/response exchange in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Delay strategy between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetryStrategy {
    /// Same pause before every retry.
    #[default]
    Fixed,
    /// Doubling pause, capped at `max_delay_ms`.
    Exponential,
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Number of retries after the first attempt.
    pub max_retries: u32,

    /// Pause before each retry in milliseconds. Must be non-zero.
    pub delay_ms: u64,

    /// How the pause evolves across attempts.
    pub strategy: RetryStrategy,

    /// Upper bound for exponential pauses in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_ms: 1000,
            strategy: RetryStrategy::Fixed,
            max_delay_ms: 30_000,
        }
    }
}

/// Chain parameters consumed by the calculators.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Seconds for voting power and resource credits to recharge from empty to full.
    pub recharge_window_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            recharge_window_secs: 5 * 24 * 60 * 60,
        }
    }
}

/// Block range fetching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockFetchConfig {
    /// Blocks requested concurrently per batch.
    pub batch_size: usize,

    /// Pause between batches in milliseconds (endpoint rate limit).
    pub batch_pause_ms: u64,
}

impl Default for BlockFetchConfig {
    fn default() -> Self {
        Self {
            batch_size: 200,
            batch_pause_ms: 3000,
        }
    }
}

/// Timestamp rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Offset from UTC for the localized block timestamp, in seconds.
    pub utc_offset_secs: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_secs: 9 * 60 * 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NodeConfig::default();
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
        assert_eq!(config.retries.max_retries, 3);
        assert_eq!(config.retries.strategy, RetryStrategy::Fixed);
        assert_eq!(config.chain.recharge_window_secs, 432_000);
        assert_eq!(config.display.utc_offset_secs, 32_400);
    }

    #[test]
    fn test_partial_toml() {
        let config: NodeConfig = toml::from_str(
            r#"
            [retries]
            max_retries = 5
            strategy = "exponential"

            [blocks]
            batch_size = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.retries.max_retries, 5);
        assert_eq!(config.retries.delay_ms, 1000);
        assert_eq!(config.retries.strategy, RetryStrategy::Exponential);
        assert_eq!(config.blocks.batch_size, 50);
        assert_eq!(config.blocks.batch_pause_ms, 3000);
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
    }
}
