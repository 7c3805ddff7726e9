//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment overrides: API_URL, MAX_RETRY, RETRY_DELAY_MS
//!     → validation.rs (semantic checks)
//!     → NodeConfig (validated, immutable)
//!     → passed by reference to the gateway, retry executor and calculators
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::NodeConfig;
pub use schema::{
    BlockFetchConfig, ChainConfig, DisplayConfig, ObservabilityConfig, RetryConfig,
    RetryStrategy, RpcConfig,
};
