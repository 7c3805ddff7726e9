//! Capacity metrics derived from snapshots.

use serde::{Deserialize, Serialize};

/// Full scale for voting power and ratios.
pub const MAX_VOTING_POWER: u32 = 10_000;

/// Resource credit state after recharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCredit {
    /// Recharged mana relative to max, 0..=10000.
    pub ratio: u32,
    /// Mana at the last update, as stored on chain.
    pub current: i64,
    /// Maximum mana.
    pub max: i64,
}

/// Stake in liquid units, each part rounded on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    /// Own vesting shares.
    pub original: i64,
    /// Delegated in by others.
    pub received: i64,
    /// Delegated out to others.
    pub delegated: i64,
    /// `original + received - delegated`.
    pub current: i64,
}

/// Per-account capacity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub voting_power: u32,
    pub resource_credit: ResourceCredit,
    pub stake: Stake,
    /// Liquid backed-dollar balance.
    pub sbd_balance: f64,
    /// Liquid STEEM balance.
    pub steem_balance: f64,
}
