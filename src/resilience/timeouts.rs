//! Timeout enforcement for remote exchanges.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::blockchain::types::TransportError;

/// Run `fut` with a deadline of `secs` seconds.
///
/// An elapsed deadline becomes [`TransportError::Timeout`] so the retry layer
/// treats it like any other transport failure.
pub async fn with_deadline<T, Fut>(secs: u64, fut: Fut) -> Result<T, TransportError>
where
    Fut: Future<Output = Result<T, TransportError>>,
{
    match timeout(Duration::from_secs(secs), fut).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout(secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_through_result() {
        let ok = with_deadline(1, async { Ok::<_, TransportError>(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err = with_deadline(1, async { Err::<u8, _>(TransportError::Status(500)) }).await;
        assert!(matches!(err, Err(TransportError::Status(500))));
    }

    #[tokio::test]
    async fn test_elapsed_deadline() {
        let res = with_deadline(1, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, TransportError>(())
        })
        .await;
        assert!(matches!(res, Err(TransportError::Timeout(1))));
    }
}
