//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Remote call:
//!     → timeouts.rs (bound each exchange by a deadline)
//!     → On failure: retries.rs (pause, log, retry until the ceiling)
//!     → backoff.rs (fixed or capped exponential pause)
//! ```
//!
//! # Design Decisions
//! - Retry policy lives here, never inside the transport
//! - Every retry is logged; nothing is swallowed
//! - Only computation on fetched data bypasses retries

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{RetryExecutor, RetryPolicy};
