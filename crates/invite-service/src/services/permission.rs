//! Permission service
//!
//! Resolves a user's guild-level permissions the way the platform does:
//! owners hold everything, everyone else holds the union of @everyone and
//! their roles, and ADMINISTRATOR bypasses every check.

use std::collections::HashSet;

use invite_core::{DomainError, Permissions, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::deadline;
use super::error::ServiceResult;

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check if a user has a specific permission in a guild
    #[instrument(skip(self))]
    pub async fn check_permission(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        permission: Permissions,
    ) -> ServiceResult<bool> {
        let permissions = self.get_member_permissions(guild_id, user_id).await?;
        Ok(permissions.has(permission))
    }

    /// Get all permissions for a member in a guild
    #[instrument(skip(self))]
    pub async fn get_member_permissions(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Permissions> {
        let limit = self.ctx.store_timeout();

        let guild = deadline::store(limit, "find_guild", self.ctx.guild_repo().find_by_id(guild_id))
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?;

        // Guild owners have all permissions
        if guild.is_owner(user_id) {
            debug!(user_id = %user_id, guild_id = %guild_id, "User is guild owner, granting all permissions");
            return Ok(Permissions::owner());
        }

        let (roles, held) = tokio::try_join!(
            deadline::store(limit, "find_roles", self.ctx.role_repo().find_by_guild(guild_id)),
            deadline::store(
                limit,
                "get_role_ids",
                self.ctx.member_repo().get_role_ids(guild_id, user_id)
            ),
        )?;
        let held: HashSet<Snowflake> = held.into_iter().collect();

        // @everyone always applies; roles deleted from the guild grant nothing
        let permissions = Permissions::combine(
            roles
                .iter()
                .filter(|role| role.is_everyone || held.contains(&role.id))
                .map(|role| role.permissions),
        );

        debug!(
            user_id = %user_id,
            guild_id = %guild_id,
            permissions = %permissions,
            "Computed member permissions"
        );

        Ok(permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryStore, BOT, GUILD, OWNER};
    use crate::ServiceError;
    use invite_core::{Guild, Role};

    #[tokio::test]
    async fn test_owner_has_every_permission() {
        let store = InMemoryStore::standard_guild().await;
        let ctx = store.context();
        let perms = PermissionService::new(&ctx)
            .get_member_permissions(GUILD, OWNER)
            .await
            .unwrap();
        assert_eq!(perms, Permissions::owner());
    }

    #[tokio::test]
    async fn test_role_permissions_are_combined() {
        let store = InMemoryStore::standard_guild().await;
        let ctx = store.context();
        let service = PermissionService::new(&ctx);

        assert!(service
            .check_permission(GUILD, BOT, Permissions::MANAGE_ROLES)
            .await
            .unwrap());
        // @everyone alone does not carry MANAGE_ROLES
        assert!(!service
            .check_permission(GUILD, Snowflake::new(999), Permissions::MANAGE_ROLES)
            .await
            .unwrap());
        assert!(service
            .check_permission(GUILD, Snowflake::new(999), Permissions::SEND_MESSAGES)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_administrator_bypass() {
        let store = InMemoryStore::new();
        let guild_id = Snowflake::new(5);
        let admin_role = Snowflake::new(6);
        store.add_guild(Guild::new(guild_id, "Admins", OWNER)).await;
        store
            .add_role(Role::new(admin_role, guild_id, "Admin").with_permissions(Permissions::ADMINISTRATOR))
            .await;
        store.give_roles(guild_id, BOT, &[admin_role]).await;

        let ctx = store.context();
        assert!(PermissionService::new(&ctx)
            .check_permission(guild_id, BOT, Permissions::MANAGE_ROLES)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_guild() {
        let store = InMemoryStore::new();
        let ctx = store.context();
        let err = PermissionService::new(&ctx)
            .get_member_permissions(GUILD, BOT)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::GuildNotFound(id)) if id == GUILD));
    }
}
