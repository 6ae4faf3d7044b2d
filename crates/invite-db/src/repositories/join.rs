//! PostgreSQL implementation of JoinRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use invite_core::entities::{DailyJoinCount, MemberJoin};
use invite_core::traits::{JoinRepository, RepoResult};
use invite_core::value_objects::Snowflake;

use crate::mappers::JoinInsert;
use crate::models::DailyJoinModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgJoinRepository {
    pool: PgPool,
}

impl PgJoinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JoinRepository for PgJoinRepository {
    #[instrument(skip(self, join), fields(guild_id = %join.guild_id, member_id = %join.member_id))]
    async fn create(&self, join: &MemberJoin) -> RepoResult<()> {
        let row = JoinInsert::new(join);

        sqlx::query(
            r"
            INSERT INTO joins (guild_id, member_id, inviter_id, invite_code, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(row.guild_id)
        .bind(row.member_id)
        .bind(row.inviter_id)
        .bind(row.invite_code)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// Newest days first, so the `LIMIT` keeps the most recent window
    #[instrument(skip(self))]
    async fn daily_counts(
        &self,
        guild_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<DailyJoinCount>> {
        // Days are calendar days in UTC regardless of the session time zone
        let results = sqlx::query_as::<_, DailyJoinModel>(
            r"
            SELECT (created_at AT TIME ZONE 'UTC')::DATE AS day, COUNT(*)::BIGINT AS total
            FROM joins
            WHERE guild_id = $1
            GROUP BY day
            ORDER BY day DESC
            LIMIT $2
            ",
        )
        .bind(guild_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DailyJoinCount::from).collect())
    }
}
