//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use invite_core::entities::{AuditEntry, NewAuditEntry};
use invite_core::traits::{AuditLogRepository, RepoResult};

use crate::models::AuditLogModel;

use super::error::map_audit_error;

/// Append-only `audit_logs` table
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry), fields(action = %entry.action, guild_id = %entry.guild_id))]
    async fn create(&self, entry: &NewAuditEntry) -> RepoResult<AuditEntry> {
        let model = sqlx::query_as::<_, AuditLogModel>(
            r"
            INSERT INTO audit_logs (action, guild_id, member_id, data)
            VALUES ($1, $2, $3, $4)
            RETURNING id, action, guild_id, member_id, data, created_at
            ",
        )
        .bind(entry.action.as_str())
        .bind(entry.guild_id.into_inner())
        .bind(entry.member_id.into_inner())
        .bind(&entry.data)
        .fetch_one(&self.pool)
        .await
        .map_err(map_audit_error)?;

        AuditEntry::try_from(model)
    }
}
