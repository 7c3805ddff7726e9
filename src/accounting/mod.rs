//! Resource accounting.
//!
//! # Data Flow
//! ```text
//! AccountSnapshot ─┬─▶ voting power (decay since last vote)
//!                  └─▶ stake (vesting shares → liquid units)
//! ResourceCreditSnapshot ─▶ resource credit (recharge since last update)
//! GlobalProperties ─▶ vesting ratio for stake
//!                  ─▶ CapacityReport
//! ```

pub mod calculator;
pub mod types;

pub use calculator::{vests_to_steem, ResourceCalculator};
pub use types::{CapacityReport, ResourceCredit, Stake, MAX_VOTING_POWER};
