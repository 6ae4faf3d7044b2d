//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use invite_core::traits::{MemberRepository, RepoResult};
use invite_core::value_objects::Snowflake;

use super::error::{map_db_error, map_role_grant_error};

/// Member role assignments (`member_roles`)
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn get_role_ids(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Snowflake>> {
        let role_ids: Vec<i64> = sqlx::query_scalar(
            r"
            SELECT role_id FROM member_roles WHERE guild_id = $1 AND user_id = $2
            ",
        )
        .bind(guild_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(role_ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self, role_ids), fields(count = role_ids.len()))]
    async fn add_roles(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> RepoResult<()> {
        if role_ids.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = role_ids.iter().map(|id| id.into_inner()).collect();

        // One statement for the whole batch
        let result = sqlx::query(
            r"
            INSERT INTO member_roles (guild_id, user_id, role_id)
            SELECT $1, $2, role_id FROM UNNEST($3::BIGINT[]) AS t(role_id)
            ON CONFLICT (guild_id, user_id, role_id) DO NOTHING
            ",
        )
        .bind(guild_id.into_inner())
        .bind(user_id.into_inner())
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(map_role_grant_error)?;

        debug!(inserted = result.rows_affected(), "Roles granted");
        Ok(())
    }
}
