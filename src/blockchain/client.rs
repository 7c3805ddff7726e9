//! JSON-RPC 2.0 gateway to a single node endpoint.
//!
//! # Responsibilities
//! - Build the request envelope
//! - Perform one request/response exchange under a deadline
//! - Hand back the `result` field, or a [`TransportError`]
//!
//! Retrying is the caller's job (see [`crate::resilience::RetryExecutor`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blockchain::types::{ClientError, ClientResult, TransportError};
use crate::config::RpcConfig;
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;

/// Request envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a Value>,
    pub id: u64,
}

impl<'a> RpcRequest<'a> {
    /// Build a JSON-RPC 2.0 envelope.
    pub fn new(method: &'a str, params: Option<&'a Value>, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// Gateway bound to one configured endpoint.
#[derive(Clone)]
pub struct RpcGateway {
    http: reqwest::Client,
    url: url::Url,
    timeout_secs: u64,
}

impl RpcGateway {
    /// Create a gateway for the configured endpoint.
    pub fn new(config: &RpcConfig) -> ClientResult<Self> {
        let url: url::Url = config
            .url
            .parse()
            .map_err(|e| ClientError::Setup(format!("Invalid RPC URL '{}': {}", config.url, e)))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Setup(format!("HTTP client: {}", e)))?;

        tracing::debug!(rpc_url = %url, timeout_secs = config.timeout_secs, "RPC gateway ready");

        Ok(Self {
            http,
            url,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Call `method` with id 1.
    pub async fn call(&self, method: &str, params: Option<&Value>) -> Result<Value, TransportError> {
        self.call_with_id(method, params, 1).await
    }

    /// Call `method` with an explicit request id.
    pub async fn call_with_id(
        &self,
        method: &str,
        params: Option<&Value>,
        id: u64,
    ) -> Result<Value, TransportError> {
        let request = RpcRequest::new(method, params, id);
        let result = with_deadline(self.timeout_secs, self.exchange(&request)).await;

        metrics::record_rpc_request(method, result.is_ok());
        if let Err(e) = &result {
            tracing::debug!(method = %method, error = %e, "RPC exchange failed");
        }
        result
    }

    async fn exchange(&self, request: &RpcRequest<'_>) -> Result<Value, TransportError> {
        let response = self
            .http
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let envelope: RpcResponse = serde_json::from_slice(&body)
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        if let Some(err) = envelope.error {
            return Err(TransportError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        // A JSON `null` result is a valid answer (e.g. unknown block).
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Get the endpoint.
    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

impl std::fmt::Debug for RpcGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcGateway")
            .field("rpc_url", &self.url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
