//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Guild not found: {0}")]
    GuildNotFound(Snowflake),

    #[error("Role not found: {0}")]
    RoleNotFound(Snowflake),

    #[error("No rank configured for role {0}")]
    RankNotFound(Snowflake),

    #[error("Invite code not found: {0}")]
    InviteCodeNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Another rank already requires {threshold} invites (role {role_id})")]
    DuplicateRankThreshold { threshold: i64, role_id: Snowflake },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Role service unavailable: {0}")]
    RoleServiceUnavailable(String),

    #[error("Audit write failed: {0}")]
    AuditWriteFailure(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::GuildNotFound(_) => "UNKNOWN_GUILD",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::RankNotFound(_) => "UNKNOWN_RANK",
            Self::InviteCodeNotFound(_) => "UNKNOWN_INVITE",

            Self::ValidationError(_) => "VALIDATION_ERROR",

            Self::MissingPermission(_) => "MISSING_PERMISSIONS",

            Self::DuplicateRankThreshold { .. } => "DUPLICATE_RANK_THRESHOLD",

            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::RoleServiceUnavailable(_) => "ROLE_SERVICE_UNAVAILABLE",
            Self::AuditWriteFailure(_) => "AUDIT_WRITE_FAILURE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GuildNotFound(_)
                | Self::RoleNotFound(_)
                | Self::RankNotFound(_)
                | Self::InviteCodeNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateRankThreshold { .. })
    }

    /// A dependency could not answer; the whole flow may be retried
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::RoleServiceUnavailable(_)
        )
    }
}
