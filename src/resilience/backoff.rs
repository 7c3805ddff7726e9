//! Pause computation between retry attempts.

use std::time::Duration;

use crate::config::RetryStrategy;

/// Calculate the pause before retry number `attempt` (1-based).
///
/// Never returns zero for `attempt >= 1` as long as `base_ms` is non-zero.
pub fn calculate_backoff(
    strategy: RetryStrategy,
    attempt: u32,
    base_ms: u64,
    max_ms: u64,
) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let delay_ms = match strategy {
        RetryStrategy::Fixed => base_ms,
        RetryStrategy::Exponential => {
            let exponential_base = 2u64.saturating_pow(attempt - 1);
            base_ms.saturating_mul(exponential_base).min(max_ms.max(base_ms))
        }
    };

    Duration::from_millis(delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_backoff() {
        for attempt in 1..6 {
            let d = calculate_backoff(RetryStrategy::Fixed, attempt, 250, 1000);
            assert_eq!(d, Duration::from_millis(250));
        }
    }

    #[test]
    fn test_exponential_backoff() {
        let b1 = calculate_backoff(RetryStrategy::Exponential, 1, 100, 2000);
        assert_eq!(b1.as_millis(), 100);

        let b2 = calculate_backoff(RetryStrategy::Exponential, 2, 100, 2000);
        assert_eq!(b2.as_millis(), 200);

        let max = calculate_backoff(RetryStrategy::Exponential, 10, 100, 1000);
        assert_eq!(max.as_millis(), 1000);
    }

    #[test]
    fn test_zeroth_attempt_has_no_pause() {
        assert_eq!(
            calculate_backoff(RetryStrategy::Fixed, 0, 100, 100),
            Duration::ZERO
        );
    }
}
