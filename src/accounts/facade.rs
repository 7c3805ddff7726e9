//! Per-account capacity report and reward claims.

use chrono::Utc;

use crate::accounting::{CapacityReport, ResourceCalculator};
use crate::blockchain::api::ChainApi;
use crate::blockchain::models::AccountSnapshot;
use crate::blockchain::transaction::{Broadcaster, ClaimOutcome, Operation};
use crate::blockchain::types::{ClientResult, ComputationError};
use crate::blockchain::wallet::PostingKey;
use crate::config::NodeConfig;

/// Composes the chain API with the resource calculator.
#[derive(Debug, Clone)]
pub struct AccountFacade {
    api: ChainApi,
    calculator: ResourceCalculator,
}

impl AccountFacade {
    /// Build from a validated configuration.
    pub fn new(config: &NodeConfig) -> ClientResult<Self> {
        Ok(Self::with_parts(
            ChainApi::new(config)?,
            ResourceCalculator::from(&config.chain),
        ))
    }

    pub fn with_parts(api: ChainApi, calculator: ResourceCalculator) -> Self {
        Self { api, calculator }
    }

    /// Get the underlying chain API.
    pub fn api(&self) -> &ChainApi {
        &self.api
    }

    /// Account snapshot, failing when the account does not exist.
    pub async fn require_account(&self, name: &str) -> ClientResult<AccountSnapshot> {
        self.api
            .get_account(name)
            .await?
            .ok_or_else(|| ComputationError::AccountNotFound(name.to_string()).into())
    }

    /// Voting power, resource credits, stake and liquid balances of `name`.
    ///
    /// The account, its resource credits and the global properties are
    /// fetched concurrently. Any terminal failure fails the whole report.
    pub async fn capacity_report(&self, name: &str) -> ClientResult<CapacityReport> {
        let (account, rc, globals) = tokio::try_join!(
            self.require_account(name),
            self.api.find_rc_account(name),
            self.api.get_dynamic_global_properties(),
        )?;

        let report = self
            .calculator
            .capacity_report(&account, &rc, &globals, Utc::now())?;

        tracing::debug!(
            account = %name,
            voting_power = report.voting_power,
            rc_ratio = report.resource_credit.ratio,
            stake = report.stake.current,
            "Capacity report computed"
        );
        Ok(report)
    }

    /// Claim all pending rewards of `account`.
    ///
    /// Returns [`ClaimOutcome::NothingToClaim`] without broadcasting when all
    /// three reward balances are zero.
    pub async fn claim_reward_balance<B: Broadcaster>(
        &self,
        broadcaster: &B,
        account: &str,
        key: &PostingKey,
    ) -> ClientResult<ClaimOutcome> {
        let snapshot = self.require_account(account).await?;
        let rewards = snapshot.rewards;

        if rewards.is_empty() {
            tracing::info!(account = %account, "No rewards to claim");
            return Ok(ClaimOutcome::NothingToClaim);
        }

        let operation = Operation::ClaimRewardBalance {
            account: account.to_string(),
            reward_steem: rewards.steem,
            reward_sbd: rewards.sbd,
            reward_vests: rewards.vesting,
        };
        tracing::info!(account = %account, "Claiming rewards");
        let result = self.api.broadcast(broadcaster, key, &operation).await?;
        Ok(ClaimOutcome::Claimed(result))
    }
}
