//! PostgreSQL implementation of RoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use invite_core::entities::Role;
use invite_core::traits::{RepoResult, RoleRepository};
use invite_core::value_objects::Snowflake;

use crate::models::RoleModel;

use super::error::map_db_error;

/// Live role directory
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Role>> {
        let results = sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT id, guild_id, name, position, permissions, is_everyone
            FROM roles
            WHERE guild_id = $1 AND deleted_at IS NULL
            ORDER BY position DESC
            "#,
        )
        .bind(guild_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Role::from).collect())
    }
}
