//! Audit logger
//!
//! Append-only side channel. Failures are reported to the caller, who
//! decides whether to surface them; they never abort the triggering flow.

use invite_core::{AuditAction, AuditEntry, DomainError, NewAuditEntry, Snowflake};
use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::deadline;
use super::error::ServiceResult;

pub struct AuditService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append one entry; the store assigns id and timestamp
    ///
    /// # Errors
    /// Any failure is reported as `DomainError::AuditWriteFailure`
    #[instrument(skip(self, data))]
    pub async fn record(
        &self,
        action: AuditAction,
        guild_id: Snowflake,
        member_id: Snowflake,
        data: JsonValue,
    ) -> ServiceResult<AuditEntry> {
        let entry = NewAuditEntry {
            action,
            guild_id,
            member_id,
            data,
        };

        let stored = deadline::audit(self.ctx.store_timeout(), self.ctx.audit_repo().create(&entry))
            .await
            .map_err(|e| match e {
                DomainError::AuditWriteFailure(_) => e,
                other => DomainError::AuditWriteFailure(other.to_string()),
            })?;

        debug!(audit_id = stored.id, action = %action, "Audit entry recorded");
        Ok(stored)
    }

    /// Like `record`, but a failure is logged and handed back as a message
    pub async fn record_or_report(
        &self,
        action: AuditAction,
        guild_id: Snowflake,
        member_id: Snowflake,
        data: JsonValue,
    ) -> Option<String> {
        match self.record(action, guild_id, member_id, data).await {
            Ok(_) => None,
            Err(e) => {
                warn!(action = %action, guild_id = %guild_id, error = %e, "Audit write failed");
                Some(e.to_string())
            }
        }
    }
}
