//! Timeout helper for async operations.

use std::future::Future;
use std::time::Duration;

use crate::types::{ChurnError, Result};

/// Execute an async operation with a timeout
///
/// Returns [`ChurnError::Timeout`] if the operation doesn't complete within
/// `timeout`; the inner future is dropped at that point.
///
/// ```ignore
/// let response = with_timeout(
///     Duration::from_secs(30),
///     provider.complete(&request),
///     "completion",
/// ).await?;
/// ```
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(ChurnError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_timeout() {
        let result = with_timeout(Duration::from_secs(1), async { Ok(42) }, "quick").await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_times_out() {
        let result: Result<()> = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
            "slow",
        )
        .await;

        match result {
            Err(ChurnError::Timeout { operation, .. }) => assert_eq!(operation, "slow"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<()> = with_timeout(
            Duration::from_secs(1),
            async { Err(ChurnError::Storage("boom".to_string())) },
            "failing",
        )
        .await;
        assert!(matches!(result, Err(ChurnError::Storage(_))));
    }
}
