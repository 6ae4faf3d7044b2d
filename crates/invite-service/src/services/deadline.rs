//! Bounded port calls
//!
//! Every store or role-directory call made by a service goes through one of
//! these wrappers; an elapsed deadline becomes the matching outage error.

use std::future::Future;
use std::time::Duration;

use invite_core::{DomainError, RepoResult};

/// Store reads and writes
pub(crate) async fn store<T, F>(limit: Duration, op: &'static str, call: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
        Err(DomainError::StoreUnavailable(format!(
            "{op} timed out after {}ms",
            limit.as_millis()
        )))
    })
}

/// The batched role grant
pub(crate) async fn role_grant<T, F>(limit: Duration, call: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
        Err(DomainError::RoleServiceUnavailable(format!(
            "role grant timed out after {}ms",
            limit.as_millis()
        )))
    })
}

/// Audit appends
pub(crate) async fn audit<T, F>(limit: Duration, call: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
        Err(DomainError::AuditWriteFailure(format!(
            "audit append timed out after {}ms",
            limit.as_millis()
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_elapsed_store_call_is_unavailable() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, DomainError>(1)
        };
        let err = store(Duration::from_millis(10), "custom_sum", slow)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StoreUnavailable(msg) if msg.contains("custom_sum")));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let value = role_grant(Duration::from_secs(1), async { Ok::<_, DomainError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_inner_error_is_kept() {
        let err = audit(Duration::from_secs(1), async {
            Err::<(), _>(DomainError::AuditWriteFailure("disk full".to_string()))
        })
        .await
        .unwrap_err();
        assert_eq!(err, DomainError::AuditWriteFailure("disk full".to_string()));
    }
}
