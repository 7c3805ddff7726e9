//! Resilient Steem JSON-RPC client with resource accounting.

pub mod accounting;
pub mod accounts;
pub mod blockchain;
pub mod config;
pub mod observability;
pub mod resilience;

pub use accounting::{CapacityReport, ResourceCalculator};
pub use accounts::AccountFacade;
pub use blockchain::{ChainApi, ClientError, RpcGateway};
pub use config::schema::NodeConfig;
pub use resilience::{RetryExecutor, RetryPolicy};
