//! PostgreSQL implementation of InviteLedger

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use invite_core::entities::CustomInvite;
use invite_core::traits::{InviteLedger, RepoResult};
use invite_core::value_objects::Snowflake;

use crate::mappers::CustomInviteInsert;

use super::error::map_db_error;

/// Credit sources backed by the `invites` and `custom_invites` tables
#[derive(Clone)]
pub struct PgInviteLedger {
    pool: PgPool,
}

impl PgInviteLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteLedger for PgInviteLedger {
    /// Counts every code the member ever created, revoked ones included
    #[instrument(skip(self))]
    async fn code_uses_sum(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Option<i64>> {
        sqlx::query_scalar::<_, Option<i64>>(
            r"
            SELECT SUM(uses)::BIGINT
            FROM invites
            WHERE guild_id = $1 AND inviter_id = $2
            ",
        )
        .bind(guild_id.into_inner())
        .bind(member_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn custom_sum(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        generated: bool,
    ) -> RepoResult<Option<i64>> {
        // SUM(BIGINT) is NUMERIC in PostgreSQL
        sqlx::query_scalar::<_, Option<i64>>(
            r"
            SELECT SUM(amount)::BIGINT
            FROM custom_invites
            WHERE guild_id = $1 AND member_id = $2 AND generated = $3
            ",
        )
        .bind(guild_id.into_inner())
        .bind(member_id.into_inner())
        .bind(generated)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, adjustment), fields(guild_id = %adjustment.guild_id, member_id = %adjustment.member_id))]
    async fn add_custom_invite(&self, adjustment: &CustomInvite) -> RepoResult<()> {
        let row = CustomInviteInsert::new(adjustment);

        sqlx::query(
            r"
            INSERT INTO custom_invites (guild_id, member_id, creator_id, amount, reason, generated, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(row.guild_id)
        .bind(row.member_id)
        .bind(row.creator_id)
        .bind(row.amount)
        .bind(row.reason)
        .bind(row.generated)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
