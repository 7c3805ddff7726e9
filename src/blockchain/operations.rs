//! Flattening of fetched blocks into an ordered operation stream.
//!
//! Order is rebuilt from the `(block_num, transaction_num)` carried in each
//! payload, never from the order in which blocks arrived.
//!
//! Virtual operations (rewards, fills, ...) are produced by the chain outside
//! of transaction bodies and are NOT part of the output. They need
//! `account_history_api` or `condenser_api.get_ops_in_block`.

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::blockchain::models::{chain_time, BlockRecord};

/// Format of the localized timestamp.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One operation together with its block and transaction coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRecord {
    /// Block time rendered in the configured offset.
    pub block_timestamp_local: String,
    /// Block time as the chain reports it (UTC).
    pub block_timestamp_utc: String,
    pub block_id: String,
    pub block_num: u64,
    pub transaction_id: String,
    pub transaction_num: u32,
    pub operation_type: String,
    pub operation_data: Value,
}

/// Flattens blocks into operation records.
#[derive(Debug, Clone, Copy)]
pub struct OperationExtractor {
    offset: FixedOffset,
}

impl OperationExtractor {
    /// Create an extractor rendering local times at `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build from an offset in seconds; out-of-range values fall back to UTC.
    pub fn from_offset_secs(secs: i32) -> Self {
        let offset = FixedOffset::east_opt(secs).unwrap_or_else(|| {
            tracing::warn!(utc_offset_secs = secs, "Offset out of range, using UTC");
            Utc.fix()
        });
        Self::new(offset)
    }

    /// Emit one record per operation, sorted by block number then
    /// transaction number. Operations of one transaction keep their order.
    pub fn extract(&self, blocks: &[BlockRecord]) -> Vec<OperationRecord> {
        let mut operations = Vec::new();

        for block in blocks {
            let local = block
                .timestamp
                .with_timezone(&self.offset)
                .format(LOCAL_TIME_FORMAT)
                .to_string();
            let utc = block.timestamp.format(chain_time::FORMAT).to_string();

            for tx in &block.transactions {
                for (operation_type, operation_data) in &tx.operations {
                    operations.push(OperationRecord {
                        block_timestamp_local: local.clone(),
                        block_timestamp_utc: utc.clone(),
                        block_id: block.block_id.clone(),
                        block_num: tx.block_num,
                        transaction_id: tx.transaction_id.clone(),
                        transaction_num: tx.transaction_num,
                        operation_type: operation_type.clone(),
                        operation_data: operation_data.clone(),
                    });
                }
            }
        }

        // Stable: ties keep emission order.
        operations.sort_by_key(|op| (op.block_num, op.transaction_num));
        operations
    }
}

impl Default for OperationExtractor {
    fn default() -> Self {
        Self::from_offset_secs(crate::config::DisplayConfig::default().utc_offset_secs)
    }
}
