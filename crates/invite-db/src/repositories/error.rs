//! Error handling utilities for repositories
//!
//! Every store failure collapses into one of the domain's outage variants;
//! callers decide whether it is fatal.

use invite_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Reads and ledger writes
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::StoreUnavailable(e.to_string())
}

/// Check for unique violation and return the given conflict or a store outage
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if is_unique_violation(&e) {
        return on_unique();
    }
    map_db_error(e)
}

pub fn is_unique_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// The batched role grant
pub fn map_role_grant_error(e: SqlxError) -> DomainError {
    DomainError::RoleServiceUnavailable(e.to_string())
}

/// Audit appends
pub fn map_audit_error(e: SqlxError) -> DomainError {
    DomainError::AuditWriteFailure(e.to_string())
}

/// Create an "invite code not found" error
pub fn invite_not_found(code: &str) -> DomainError {
    DomainError::InviteCodeNotFound(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mappings_pick_the_outage_kind() {
        assert!(matches!(
            map_db_error(SqlxError::PoolTimedOut),
            DomainError::StoreUnavailable(_)
        ));
        assert!(matches!(
            map_role_grant_error(SqlxError::PoolTimedOut),
            DomainError::RoleServiceUnavailable(_)
        ));
        assert!(matches!(
            map_audit_error(SqlxError::RowNotFound),
            DomainError::AuditWriteFailure(_)
        ));
    }

    #[test]
    fn test_non_unique_error_falls_back_to_outage() {
        assert!(!is_unique_violation(&SqlxError::PoolTimedOut));
        let err = map_unique_violation(SqlxError::PoolTimedOut, || {
            DomainError::InviteCodeNotFound("never".to_string())
        });
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
    }
}
