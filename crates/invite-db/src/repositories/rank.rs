//! PostgreSQL implementation of RankRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use invite_core::entities::Rank;
use invite_core::error::DomainError;
use invite_core::traits::{RankRepository, RepoResult};
use invite_core::value_objects::Snowflake;

use crate::models::RankModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgRankRepository {
    pool: PgPool,
}

impl PgRankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Role currently holding a threshold, if any
    async fn threshold_holder(
        &self,
        guild_id: Snowflake,
        num_invites: i64,
    ) -> RepoResult<Option<Snowflake>> {
        let holder: Option<i64> =
            sqlx::query_scalar("SELECT role_id FROM ranks WHERE guild_id = $1 AND num_invites = $2")
                .bind(guild_id.into_inner())
                .bind(num_invites)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(holder.map(Snowflake::new))
    }
}

#[async_trait]
impl RankRepository for PgRankRepository {
    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Rank>> {
        let results = sqlx::query_as::<_, RankModel>(
            r"
            SELECT guild_id, role_id, num_invites
            FROM ranks
            WHERE guild_id = $1
            ",
        )
        .bind(guild_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Rank::from).collect())
    }

    #[instrument(skip(self))]
    async fn find(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<Option<Rank>> {
        let result = sqlx::query_as::<_, RankModel>(
            r"
            SELECT guild_id, role_id, num_invites
            FROM ranks
            WHERE guild_id = $1 AND role_id = $2
            ",
        )
        .bind(guild_id.into_inner())
        .bind(role_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Rank::from))
    }

    #[instrument(skip(self))]
    async fn upsert(&self, rank: &Rank) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            INSERT INTO ranks (guild_id, role_id, num_invites)
            VALUES ($1, $2, $3)
            ON CONFLICT (guild_id, role_id) DO UPDATE SET num_invites = EXCLUDED.num_invites
            ",
        )
        .bind(rank.guild_id.into_inner())
        .bind(rank.role_id.into_inner())
        .bind(rank.num_invites)
        .execute(&self.pool)
        .await;

        let Err(e) = result else {
            return Ok(());
        };

        // (guild_id, num_invites) is unique; report which role holds the threshold
        let conflict = map_unique_violation(e, || DomainError::DuplicateRankThreshold {
            threshold: rank.num_invites,
            role_id: rank.role_id,
        });
        if let DomainError::DuplicateRankThreshold { threshold, .. } = conflict {
            if let Some(holder) = self.threshold_holder(rank.guild_id, threshold).await? {
                return Err(DomainError::DuplicateRankThreshold {
                    threshold,
                    role_id: holder,
                });
            }
        }
        Err(conflict)
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM ranks WHERE guild_id = $1 AND role_id = $2")
            .bind(guild_id.into_inner())
            .bind(role_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRankRepository>();
    }
}
