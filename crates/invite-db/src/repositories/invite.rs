//! PostgreSQL implementation of InviteCodeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use invite_core::entities::InviteCode;
use invite_core::traits::{InviteCodeRepository, RepoResult};

use crate::models::InviteModel;

use super::error::{invite_not_found, map_db_error};

#[derive(Clone)]
pub struct PgInviteCodeRepository {
    pool: PgPool,
}

impl PgInviteCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteCodeRepository for PgInviteCodeRepository {
    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<InviteCode>> {
        let result = sqlx::query_as::<_, InviteModel>(
            r"
            SELECT code, guild_id, inviter_id, uses, created_at, deleted_at
            FROM invites
            WHERE code = $1 AND deleted_at IS NULL
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(InviteCode::from))
    }

    #[instrument(skip(self))]
    async fn increment_uses(&self, code: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE invites SET uses = uses + 1
            WHERE code = $1 AND deleted_at IS NULL
            ",
        )
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(invite_not_found(code));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgInviteCodeRepository>();
    }
}
