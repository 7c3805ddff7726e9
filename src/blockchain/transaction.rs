//! State-changing operations and the signing seam.
//!
//! # Responsibilities
//! - Describe vote and reward-claim operations in wire form
//! - Hand them to an external signer that signs and broadcasts
//!
//! The retry policy for broadcasts lives in the client facade.

use std::future::Future;

use serde_json::{json, Value};

use crate::blockchain::asset::Asset;
use crate::blockchain::types::TransportError;
use crate::blockchain::wallet::PostingKey;

/// Full vote weight (100%).
pub const FULL_VOTE_WEIGHT: i16 = 10_000;

/// An operation that must be signed before broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Vote {
        voter: String,
        author: String,
        permlink: String,
        /// -10000..=10000, where 10000 is 100%.
        weight: i16,
    },
    ClaimRewardBalance {
        account: String,
        reward_steem: Asset,
        reward_sbd: Asset,
        reward_vests: Asset,
    },
}

impl Operation {
    /// Operation type tag.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Vote { .. } => "vote",
            Operation::ClaimRewardBalance { .. } => "claim_reward_balance",
        }
    }

    /// `[type, payload]` pair as carried in a transaction.
    pub fn to_wire(&self) -> Value {
        match self {
            Operation::Vote {
                voter,
                author,
                permlink,
                weight,
            } => json!([
                self.name(),
                { "voter": voter, "author": author, "permlink": permlink, "weight": weight }
            ]),
            Operation::ClaimRewardBalance {
                account,
                reward_steem,
                reward_sbd,
                reward_vests,
            } => json!([
                self.name(),
                {
                    "account": account,
                    "reward_steem": reward_steem.to_string(),
                    "reward_sbd": reward_sbd.to_string(),
                    "reward_vests": reward_vests.to_string()
                }
            ]),
        }
    }
}

/// External capability that signs an operation with a key and broadcasts it.
pub trait Broadcaster {
    /// Sign and broadcast `operation`, returning the node's confirmation.
    fn broadcast(
        &self,
        key: &PostingKey,
        operation: &Operation,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// Outcome of a reward claim request.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// All reward balances were zero; nothing was broadcast.
    NothingToClaim,
    /// The claim was broadcast.
    Claimed(Value),
}
