//! Steem node integration subsystem.
//!
//! # Data Flow
//! ```text
//! NodeConfig (endpoint, timeout, retry policy)
//!     → client.rs (JSON-RPC envelope, one exchange per call)
//!     → api.rs (retry-wrapped reads and broadcasts)
//!     → models.rs (typed snapshots, parsed once)
//!     → operations.rs (block flattening and ordering)
//! ```
//!
//! # Security Constraints
//! - Posting keys ONLY from environment variables or explicit input
//! - Never log keys
//! - Signing is delegated to an external `Broadcaster`

pub mod api;
pub mod asset;
pub mod client;
pub mod models;
pub mod operations;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use api::ChainApi;
pub use asset::Asset;
pub use client::RpcGateway;
pub use operations::{OperationExtractor, OperationRecord};
pub use transaction::{Broadcaster, ClaimOutcome, Operation};
pub use types::{ClientError, ClientResult, ComputationError, TransportError};
pub use wallet::PostingKey;
