//! Typed snapshots of node payloads.
//!
//! Every payload is parsed once at the boundary. Missing or malformed fields
//! fail here with [`ComputationError::Malformed`] instead of deep inside the
//! calculators.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blockchain::asset::Asset;
use crate::blockchain::types::ComputationError;

/// Parse a raw node payload into `T`.
pub fn parse_payload<T: DeserializeOwned>(
    entity: &'static str,
    value: Value,
) -> Result<T, ComputationError> {
    serde_json::from_value(value).map_err(|e| ComputationError::Malformed {
        entity,
        reason: e.to_string(),
    })
}

/// Chain timestamps, which carry no zone marker and are UTC.
pub mod chain_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Wire format used by the node.
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    /// Parse a chain timestamp. Zone-less values are read as UTC; explicit
    /// offsets are honored.
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

/// Integers the node sometimes encodes as JSON strings.
mod int_or_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Str(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(v),
            Repr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Pending author/curation rewards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RewardBalances {
    #[serde(rename = "reward_steem_balance")]
    pub steem: Asset,
    #[serde(rename = "reward_sbd_balance")]
    pub sbd: Asset,
    #[serde(rename = "reward_vesting_balance")]
    pub vesting: Asset,
}

impl RewardBalances {
    /// True when there is nothing to claim.
    pub fn is_empty(&self) -> bool {
        self.steem.is_zero() && self.sbd.is_zero() && self.vesting.is_zero()
    }
}

/// Point-in-time account record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccountSnapshot {
    pub name: String,
    /// Voting power at `last_vote_time`, 0..=10000.
    pub voting_power: i64,
    #[serde(with = "chain_time")]
    pub last_vote_time: DateTime<Utc>,
    pub vesting_shares: Asset,
    pub received_vesting_shares: Asset,
    pub delegated_vesting_shares: Asset,
    #[serde(flatten)]
    pub rewards: RewardBalances,
    /// Liquid STEEM.
    pub balance: Asset,
    /// Liquid backed dollars.
    pub sbd_balance: Asset,
}

/// Point-in-time resource credit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceCreditSnapshot {
    pub account: String,
    pub current_mana: i64,
    pub max_mana: i64,
    /// Unix seconds.
    pub last_update_time: i64,
}

#[derive(Deserialize)]
struct RcAccountsEnvelope {
    rc_accounts: Vec<RawRcAccount>,
}

#[derive(Deserialize)]
struct RawRcAccount {
    account: String,
    rc_manabar: RawManabar,
    #[serde(with = "int_or_string")]
    max_rc: i64,
}

#[derive(Deserialize)]
struct RawManabar {
    #[serde(with = "int_or_string")]
    current_mana: i64,
    #[serde(with = "int_or_string")]
    last_update_time: i64,
}

impl ResourceCreditSnapshot {
    /// Pick `account` out of an `rc_api.find_rc_accounts` result.
    pub fn from_lookup(account: &str, value: Value) -> Result<Self, ComputationError> {
        let envelope: RcAccountsEnvelope = parse_payload("rc account lookup", value)?;
        envelope
            .rc_accounts
            .into_iter()
            .find(|rc| rc.account == account)
            .map(|rc| Self {
                account: rc.account,
                current_mana: rc.rc_manabar.current_mana,
                max_mana: rc.max_rc,
                last_update_time: rc.rc_manabar.last_update_time,
            })
            .ok_or_else(|| ComputationError::RcAccountNotFound(account.to_string()))
    }
}

/// Chain-wide dynamic properties.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GlobalProperties {
    pub head_block_number: u64,
    #[serde(rename = "last_irreversible_block_num")]
    pub last_irreversible_block_number: u64,
    pub total_vesting_shares: Asset,
    pub total_vesting_fund_steem: Asset,
}

/// A raw block as returned by the node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlockRecord {
    pub block_id: String,
    #[serde(with = "chain_time")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// A transaction inside a block.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub block_num: u64,
    pub transaction_num: u32,
    pub transaction_id: String,
    /// `[type, payload]` pairs.
    pub operations: Vec<(String, Value)>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActiveVote {
    pub voter: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A post or comment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Content {
    pub author: String,
    pub permlink: String,
    #[serde(default)]
    pub post_id: u64,
    #[serde(default)]
    pub url: String,
    pub created: String,
    pub last_update: String,
    #[serde(default)]
    pub active_votes: Vec<ActiveVote>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Content {
    /// Whether `voter` appears in the active votes.
    pub fn voted_by(&self, voter: &str) -> bool {
        self.active_votes.iter().any(|v| v.voter == voter)
    }

    /// Whether the content was edited after creation.
    pub fn changed(&self) -> bool {
        self.created != self.last_update
    }
}

/// Content enriched with per-voter flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentView {
    #[serde(flatten)]
    pub content: Content,
    pub changed: bool,
    pub voted: bool,
    pub voter: String,
}
