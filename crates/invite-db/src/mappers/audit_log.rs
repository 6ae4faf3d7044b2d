//! Audit entry <-> model mapper

use invite_core::entities::{AuditAction, AuditEntry};
use invite_core::error::DomainError;
use invite_core::value_objects::Snowflake;

use crate::models::AuditLogModel;

/// Rows carry the action as text; an unknown value is a schema mismatch
impl TryFrom<AuditLogModel> for AuditEntry {
    type Error = DomainError;

    fn try_from(model: AuditLogModel) -> Result<Self, Self::Error> {
        let action = model
            .action
            .parse::<AuditAction>()
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        Ok(AuditEntry {
            id: model.id,
            action,
            guild_id: Snowflake::new(model.guild_id),
            member_id: Snowflake::new(model.member_id),
            data: model.data,
            created_at: model.created_at,
        })
    }
}
