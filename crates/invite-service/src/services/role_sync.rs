//! Role synchronizer
//!
//! Applies an evaluation through the role directory. Grants are all or
//! nothing: without MANAGE_ROLES no role is added and the would-be roles are
//! reported back to the caller.

use std::collections::BTreeSet;

use invite_core::{Permissions, Snowflake};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::deadline;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Roles actually granted by one `apply_promotion` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GrantOutcome {
    pub granted: BTreeSet<Snowflake>,
}

pub struct RoleSyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleSyncService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Grant `role_ids` to the member in one batched call
    ///
    /// # Errors
    /// - `ServiceError::PermissionDenied` listing every requested role when the
    ///   bot lacks MANAGE_ROLES
    /// - `DomainError::RoleServiceUnavailable` when the grant fails or times out
    #[instrument(skip(self, role_ids), fields(requested = role_ids.len()))]
    pub async fn apply_promotion(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        role_ids: &BTreeSet<Snowflake>,
    ) -> ServiceResult<GrantOutcome> {
        if role_ids.is_empty() {
            return Ok(GrantOutcome::default());
        }

        let bot_user_id = self.ctx.bot_user_id();
        let can_manage_roles = PermissionService::new(self.ctx)
            .check_permission(guild_id, bot_user_id, Permissions::MANAGE_ROLES)
            .await?;

        if !can_manage_roles {
            warn!(
                guild_id = %guild_id,
                member_id = %member_id,
                withheld = role_ids.len(),
                "Member qualifies for roles but the bot lacks MANAGE_ROLES"
            );
            return Err(ServiceError::permission_denied(
                "MANAGE_ROLES",
                role_ids.iter().copied().collect(),
            ));
        }

        let batch: Vec<Snowflake> = role_ids.iter().copied().collect();
        deadline::role_grant(
            self.ctx.role_grant_timeout(),
            self.ctx.member_repo().add_roles(guild_id, member_id, &batch),
        )
        .await?;

        info!(guild_id = %guild_id, member_id = %member_id, granted = batch.len(), "Roles granted");

        Ok(GrantOutcome {
            granted: role_ids.clone(),
        })
    }
}
