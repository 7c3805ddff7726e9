//! Chain read/write API over the gateway.
//!
//! Every remote call goes through the [`RetryExecutor`] with its own label.
//! Payloads are parsed into typed snapshots right after the call returns;
//! parse failures are not retried.

use std::time::Duration;

use futures_util::future::try_join_all;
use serde_json::{json, Value};

use crate::blockchain::client::RpcGateway;
use crate::blockchain::models::{
    parse_payload, AccountSnapshot, BlockRecord, Content, ContentView, GlobalProperties,
    ResourceCreditSnapshot,
};
use crate::blockchain::operations::{OperationExtractor, OperationRecord};
use crate::blockchain::transaction::{Broadcaster, Operation};
use crate::blockchain::types::{ClientResult, ComputationError};
use crate::blockchain::wallet::PostingKey;
use crate::config::{BlockFetchConfig, NodeConfig};
use crate::resilience::{RetryExecutor, RetryPolicy};

/// Retry-wrapped access to the node.
#[derive(Debug, Clone)]
pub struct ChainApi {
    gateway: RpcGateway,
    retry: RetryExecutor,
    blocks: BlockFetchConfig,
    extractor: OperationExtractor,
}

impl ChainApi {
    /// Build the API from a validated configuration.
    pub fn new(config: &NodeConfig) -> ClientResult<Self> {
        Ok(Self::with_parts(
            RpcGateway::new(&config.rpc)?,
            RetryExecutor::new(RetryPolicy::from(&config.retries)),
            config.blocks.clone(),
            OperationExtractor::from_offset_secs(config.display.utc_offset_secs),
        ))
    }

    /// Assemble from already-built parts.
    pub fn with_parts(
        gateway: RpcGateway,
        retry: RetryExecutor,
        blocks: BlockFetchConfig,
        extractor: OperationExtractor,
    ) -> Self {
        Self {
            gateway,
            retry,
            blocks,
            extractor,
        }
    }

    /// Get the retry executor.
    pub fn retry(&self) -> &RetryExecutor {
        &self.retry
    }

    /// Raw JSON-RPC call under the retry policy.
    pub async fn call(&self, label: &str, method: &str, params: Option<Value>) -> ClientResult<Value> {
        let gateway = &self.gateway;
        let params = params.as_ref();
        self.retry
            .execute_labeled(label, || gateway.call(method, params))
            .await
    }

    /// Chain-wide dynamic properties, fetched fresh on every call.
    pub async fn get_dynamic_global_properties(&self) -> ClientResult<GlobalProperties> {
        let value = self
            .call(
                "get_dynamic_global_properties",
                "condenser_api.get_dynamic_global_properties",
                Some(json!([])),
            )
            .await?;
        Ok(parse_payload("global properties", value)?)
    }

    /// Head block number, or the last irreversible one when `is_head` is false.
    pub async fn get_head_block_number(&self, is_head: bool) -> ClientResult<u64> {
        let props = self.get_dynamic_global_properties().await?;
        Ok(if is_head {
            props.head_block_number
        } else {
            props.last_irreversible_block_number
        })
    }

    /// Fetch one block.
    pub async fn get_block(&self, block_num: u64) -> ClientResult<BlockRecord> {
        let value = self
            .call("get_block", "condenser_api.get_block", Some(json!([block_num])))
            .await?;
        if value.is_null() {
            return Err(ComputationError::BlockNotFound(block_num).into());
        }
        Ok(parse_payload("block", value)?)
    }

    /// Fetch blocks `start..=end` (`end` defaults to `start`).
    ///
    /// Blocks inside a batch are requested concurrently; batches are separated
    /// by the configured pause. Results are in request order, but consumers
    /// should not rely on it (see [`OperationExtractor`]).
    pub async fn get_blocks(&self, start: u64, end: Option<u64>) -> ClientResult<Vec<BlockRecord>> {
        let end = end.unwrap_or(start);
        if end < start {
            return Ok(Vec::new());
        }

        let batch_size = self.blocks.batch_size.max(1) as u64;
        let pause = Duration::from_millis(self.blocks.batch_pause_ms);
        let mut blocks = Vec::new();
        let mut cursor = Some(start);

        while let Some(batch_start) = cursor {
            if batch_start > start && !pause.is_zero() {
                tracing::debug!(pause_ms = self.blocks.batch_pause_ms, "Pausing between block batches");
                tokio::time::sleep(pause).await;
            }
            let batch_end = batch_start.saturating_add(batch_size - 1).min(end);
            let fetched = try_join_all((batch_start..=batch_end).map(|num| self.get_block(num))).await?;
            blocks.extend(fetched);
            cursor = batch_end.checked_add(1).filter(|&next| next <= end);
        }

        tracing::debug!(start, end, count = blocks.len(), "Fetched block range");
        Ok(blocks)
    }

    /// Fetch blocks `start..=end` and flatten them into ordered operations.
    ///
    /// Virtual operations are not included.
    pub async fn get_operations(&self, start: u64, end: Option<u64>) -> ClientResult<Vec<OperationRecord>> {
        let blocks = self.get_blocks(start, end).await?;
        Ok(self.extractor.extract(&blocks))
    }

    /// Batch account lookup.
    pub async fn get_accounts(&self, names: &[&str]) -> ClientResult<Vec<AccountSnapshot>> {
        let value = self
            .call("get_accounts", "condenser_api.get_accounts", Some(json!([names])))
            .await?;
        Ok(parse_payload("account", value)?)
    }

    /// Single account lookup.
    pub async fn get_account(&self, name: &str) -> ClientResult<Option<AccountSnapshot>> {
        Ok(self.get_accounts(&[name]).await?.into_iter().next())
    }

    /// Resource credit record of `name`.
    pub async fn find_rc_account(&self, name: &str) -> ClientResult<ResourceCreditSnapshot> {
        let value = self
            .call(
                "find_rc_accounts",
                "rc_api.find_rc_accounts",
                Some(json!({ "accounts": [name] })),
            )
            .await?;
        Ok(ResourceCreditSnapshot::from_lookup(name, value)?)
    }

    /// Content by author and permlink, flagged for `voter`.
    pub async fn get_content(&self, author: &str, permlink: &str, voter: &str) -> ClientResult<ContentView> {
        let value = self
            .call(
                "get_content",
                "condenser_api.get_content",
                Some(json!([author, permlink])),
            )
            .await?;
        let content: Content = parse_payload("content", value)?;

        Ok(ContentView {
            changed: content.changed(),
            voted: content.voted_by(voter),
            voter: voter.to_string(),
            content,
        })
    }

    /// State tree for a site path such as `/trending` or `/@name/comments`.
    pub async fn get_state_with(&self, path: &str) -> ClientResult<Value> {
        self.call("get_state", "condenser_api.get_state", Some(json!([path])))
            .await
    }

    /// Most recent post of `username` (highest `post_id` on the profile page).
    ///
    /// Ties on `post_id` go to the later `created`, then the greater permlink.
    pub async fn get_recent_content(&self, username: &str) -> ClientResult<Option<Content>> {
        let username = username.trim_start_matches('@');
        let mut state = self.get_state_with(&format!("/@{}", username)).await?;

        let items: std::collections::HashMap<String, Content> = match state.get_mut("content") {
            Some(content) => parse_payload("state content", content.take())?,
            None => return Ok(None),
        };
        Ok(items.into_values().max_by(|a, b| {
            (a.post_id, &a.created, &a.permlink).cmp(&(b.post_id, &b.created, &b.permlink))
        }))
    }

    /// Sign and broadcast a vote.
    pub async fn vote<B: Broadcaster>(
        &self,
        broadcaster: &B,
        key: &PostingKey,
        voter: &str,
        author: &str,
        permlink: &str,
        weight: i16,
    ) -> ClientResult<Value> {
        let operation = Operation::Vote {
            voter: voter.to_string(),
            author: author.to_string(),
            permlink: permlink.to_string(),
            weight,
        };
        tracing::info!(voter, author, permlink, weight, "Broadcasting vote");
        self.broadcast(broadcaster, key, &operation).await
    }

    /// Sign and broadcast any operation under the retry policy.
    pub async fn broadcast<B: Broadcaster>(
        &self,
        broadcaster: &B,
        key: &PostingKey,
        operation: &Operation,
    ) -> ClientResult<Value> {
        self.retry
            .execute_labeled(operation.name(), || broadcaster.broadcast(key, operation))
            .await
    }
}
