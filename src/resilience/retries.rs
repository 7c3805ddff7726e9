//! Retry execution for remote calls.
//!
//! # Responsibilities
//! - Re-run a failed remote call after a pause, up to a bounded count
//! - Log every retry with label, attempt number and the underlying failure
//! - Surface a single terminal error once the ceiling is passed
//!
//! # Design Decisions
//! - Explicit loop with an attempt counter; `max_retries = n` means at most `n + 1` attempts
//! - Any failure type that implements `Display` is treated the same way
//! - The label defaults to the wrapped closure's type name

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::blockchain::types::ClientError;
use crate::config::{RetryConfig, RetryStrategy};
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;

/// Shortest pause applied before any retry.
pub const MIN_RETRY_DELAY: Duration = Duration::from_millis(1);

/// Bounds for retrying a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Base pause before a retry.
    pub delay: Duration,
    /// Pause progression.
    pub strategy: RetryStrategy,
    /// Cap for exponential pauses.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Fixed pause policy.
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            strategy: RetryStrategy::Fixed,
            max_delay: delay,
        }
    }

    /// Pause to apply before retry number `retry` (1-based).
    ///
    /// Never shorter than [`MIN_RETRY_DELAY`], even for a zero `delay`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        calculate_backoff(
            self.strategy,
            retry,
            self.delay.as_millis() as u64,
            self.max_delay.as_millis() as u64,
        )
        .max(MIN_RETRY_DELAY)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.delay_ms),
            strategy: config.strategy,
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

/// Runs remote operations under a [`RetryPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create an executor with the given policy.
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Get the policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `operation`, labelling failures with the closure's type name.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.execute_labeled(std::any::type_name::<F>(), operation)
            .await
    }

    /// Execute `operation`, retrying failures until the ceiling is passed.
    ///
    /// # Arguments
    /// * `label` - Identifies the call in logs and in the terminal error
    /// * `operation` - Produces a fresh future per attempt
    pub async fn execute_labeled<F, Fut, T, E>(
        &self,
        label: &str,
        mut operation: F,
    ) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_retries = self.policy.max_retries;
        let mut retry: u32 = 0;

        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            retry += 1;
            if retry > max_retries {
                tracing::error!(
                    label = %label,
                    attempts = retry,
                    max_retries = max_retries,
                    error = %err,
                    "Retry ceiling reached"
                );
                metrics::record_retry_exhausted(label);
                return Err(ClientError::RetryExhausted {
                    label: label.to_string(),
                    max_retries,
                    last_error: err.to_string(),
                });
            }

            tokio::time::sleep(self.policy.delay_for(retry)).await;
            tracing::warn!(
                label = %label,
                attempt = retry,
                max_retries = max_retries,
                error = %err,
                "{} is recalled", label
            );
            metrics::record_retry(label);
        }
    }
}
