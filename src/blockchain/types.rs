//! Chain-specific error definitions.

use thiserror::Error;

/// The remote exchange did not complete. Always retryable.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS or body read failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Node answered with a non-success status.
    #[error("Node returned HTTP status {0}")]
    Status(u16),

    /// Exchange did not finish within the configured deadline.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Response body is not a JSON-RPC envelope.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Node returned a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

/// Fetched data cannot be turned into a snapshot. Never retried.
#[derive(Debug, Error, PartialEq)]
pub enum ComputationError {
    /// A required field is absent or has the wrong shape.
    #[error("Malformed {entity}: {reason}")]
    Malformed { entity: &'static str, reason: String },

    /// An amount string could not be parsed.
    #[error("Invalid asset amount '{0}'")]
    InvalidAsset(String),

    /// Account lookup returned no entry.
    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    /// Resource credit lookup returned no entry.
    #[error("Resource credit account '{0}' not found")]
    RcAccountNotFound(String),

    /// Block lookup returned null.
    #[error("Block {0} not found")]
    BlockNotFound(u64),
}

/// Errors surfaced to callers of the client facade.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A wrapped call kept failing past the retry ceiling.
    #[error("{label} retry over {max_retries}: {last_error}")]
    RetryExhausted {
        label: String,
        max_retries: u32,
        last_error: String,
    },

    /// Data was fetched but is unusable.
    #[error(transparent)]
    Computation(#[from] ComputationError),

    /// Client could not be constructed.
    #[error("Client setup failed: {0}")]
    Setup(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
