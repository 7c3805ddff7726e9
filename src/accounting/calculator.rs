//! Time-decay resource accounting.
//!
//! Voting power and resource credits both recharge linearly from empty to
//! full over one recharge window (432000 seconds on the current chain).
//! All functions here are pure: same snapshot and evaluation time, same answer.

use chrono::{DateTime, Utc};

use crate::accounting::types::{
    CapacityReport, ResourceCredit, Stake, MAX_VOTING_POWER,
};
use crate::blockchain::asset::Asset;
use crate::blockchain::models::{AccountSnapshot, GlobalProperties, ResourceCreditSnapshot};
use crate::blockchain::types::ComputationError;
use crate::config::ChainConfig;

/// Applies recharge physics to fetched snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCalculator {
    recharge_window_secs: u64,
}

impl ResourceCalculator {
    /// Create a calculator for a recharge window in seconds (must be non-zero).
    pub fn new(recharge_window_secs: u64) -> Self {
        Self {
            recharge_window_secs: recharge_window_secs.max(1),
        }
    }

    /// Get the recharge window in seconds.
    pub fn recharge_window_secs(&self) -> u64 {
        self.recharge_window_secs
    }

    /// Voting power of `account` at `now`.
    pub fn voting_power(&self, account: &AccountSnapshot, now: DateTime<Utc>) -> u32 {
        self.voting_power_at(account.voting_power, account.last_vote_time, now)
    }

    /// `min(10000, trunc(last + elapsed / window * 10000))`, never below 0.
    ///
    /// Elapsed time keeps millisecond precision. A negative gap (clock skew)
    /// goes through the same formula and the same clamp.
    pub fn voting_power_at(
        &self,
        last_voting_power: i64,
        last_vote_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> u32 {
        let window_ms = self.recharge_window_secs as i128 * 1000;
        let elapsed_ms = (now - last_vote_time).num_milliseconds() as i128;
        let full = MAX_VOTING_POWER as i128;

        // Integer division truncates toward zero.
        let vp = (last_voting_power as i128 * window_ms + elapsed_ms * full) / window_ms;
        vp.clamp(0, full) as u32
    }

    /// Resource credits of `rc` at `now`.
    pub fn resource_credit(&self, rc: &ResourceCreditSnapshot, now: DateTime<Utc>) -> ResourceCredit {
        self.resource_credit_at(rc.current_mana, rc.max_mana, rc.last_update_time, now.timestamp())
    }

    /// Recharge `current_mana` by `max_mana / window` per elapsed second,
    /// capped at `max_mana`, and report the ratio on the 0..=10000 scale.
    pub fn resource_credit_at(
        &self,
        current_mana: i64,
        max_mana: i64,
        last_update_time: i64,
        now: i64,
    ) -> ResourceCredit {
        if max_mana <= 0 {
            return ResourceCredit {
                ratio: 0,
                current: current_mana,
                max: max_mana,
            };
        }

        let max = max_mana as i128;
        let elapsed = now as i128 - last_update_time as i128;
        let recharged = max * elapsed / self.recharge_window_secs as i128;
        let mana = (recharged + current_mana as i128).clamp(0, max);
        let ratio = mana * MAX_VOTING_POWER as i128 / max;

        ResourceCredit {
            ratio: ratio as u32,
            current: current_mana,
            max: max_mana,
        }
    }

    /// Stake of `account` in liquid units.
    ///
    /// Each component is rounded before `current` is combined from them.
    pub fn stake(
        &self,
        account: &AccountSnapshot,
        globals: &GlobalProperties,
    ) -> Result<Stake, ComputationError> {
        let total_shares = &globals.total_vesting_shares;
        let total_fund = &globals.total_vesting_fund_steem;

        let original = vests_to_steem(&account.vesting_shares, total_shares, total_fund)?;
        let received = vests_to_steem(&account.received_vesting_shares, total_shares, total_fund)?;
        let delegated =
            vests_to_steem(&account.delegated_vesting_shares, total_shares, total_fund)?;

        Ok(Stake {
            original,
            received,
            delegated,
            current: original + received - delegated,
        })
    }

    /// Assemble a report from one consistent set of snapshots.
    pub fn capacity_report(
        &self,
        account: &AccountSnapshot,
        rc: &ResourceCreditSnapshot,
        globals: &GlobalProperties,
        now: DateTime<Utc>,
    ) -> Result<CapacityReport, ComputationError> {
        Ok(CapacityReport {
            voting_power: self.voting_power(account, now),
            resource_credit: self.resource_credit(rc, now),
            stake: self.stake(account, globals)?,
            sbd_balance: account.sbd_balance.amount,
            steem_balance: account.balance.amount,
        })
    }
}

impl From<&ChainConfig> for ResourceCalculator {
    fn from(config: &ChainConfig) -> Self {
        Self::new(config.recharge_window_secs)
    }
}

impl Default for ResourceCalculator {
    fn default() -> Self {
        Self::from(&ChainConfig::default())
    }
}

/// `vests * total_fund / total_shares`, rounded half away from zero.
pub fn vests_to_steem(
    vests: &Asset,
    total_vesting_shares: &Asset,
    total_vesting_fund_steem: &Asset,
) -> Result<i64, ComputationError> {
    if total_vesting_shares.amount <= 0.0 {
        return Err(ComputationError::Malformed {
            entity: "global properties",
            reason: format!("total_vesting_shares is {}", total_vesting_shares),
        });
    }
    let steem =
        total_vesting_fund_steem.amount * (vests.amount / total_vesting_shares.amount);
    Ok(steem.round() as i64)
}
