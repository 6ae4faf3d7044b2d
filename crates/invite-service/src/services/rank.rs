//! Rank configuration

use std::collections::HashMap;

use invite_core::{AuditAction, DomainError, Rank, Snowflake};
use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::deadline;
use super::error::{ServiceError, ServiceResult};

/// A rank together with the current name of its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankView {
    pub role_id: Snowflake,
    pub num_invites: i64,
    /// `None` when the role was deleted
    pub role_name: Option<String>,
    pub stale: bool,
}

/// Rank table change, with the audit outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankChange {
    pub rank: Rank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_failure: Option<String>,
}

pub struct RankService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RankService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ranks of the guild, lowest threshold first
    #[instrument(skip(self))]
    pub async fn list_ranks(&self, guild_id: Snowflake) -> ServiceResult<Vec<RankView>> {
        let limit = self.ctx.store_timeout();
        let (ranks, roles) = tokio::try_join!(
            deadline::store(limit, "find_ranks", self.ctx.rank_repo().find_by_guild(guild_id)),
            deadline::store(limit, "find_roles", self.ctx.role_repo().find_by_guild(guild_id)),
        )?;

        let names: HashMap<Snowflake, String> =
            roles.into_iter().map(|role| (role.id, role.name)).collect();

        let mut views: Vec<RankView> = ranks
            .into_iter()
            .map(|rank| {
                let role_name = names.get(&rank.role_id).cloned();
                RankView {
                    role_id: rank.role_id,
                    num_invites: rank.num_invites,
                    stale: role_name.is_none(),
                    role_name,
                }
            })
            .collect();
        views.sort_by_key(|view| (view.num_invites, view.role_id));

        Ok(views)
    }

    /// Attach a threshold to a live role, replacing any previous one
    ///
    /// # Errors
    /// - `Validation` for a negative threshold
    /// - `RoleNotFound` if the role is not live in the guild
    /// - `DuplicateRankThreshold` if another role already uses the threshold
    #[instrument(skip(self))]
    pub async fn set_rank(
        &self,
        guild_id: Snowflake,
        actor_id: Snowflake,
        role_id: Snowflake,
        num_invites: i64,
    ) -> ServiceResult<RankChange> {
        if num_invites < 0 {
            return Err(ServiceError::validation("num_invites must not be negative"));
        }

        let limit = self.ctx.store_timeout();
        let (ranks, roles) = tokio::try_join!(
            deadline::store(limit, "find_ranks", self.ctx.rank_repo().find_by_guild(guild_id)),
            deadline::store(limit, "find_roles", self.ctx.role_repo().find_by_guild(guild_id)),
        )?;

        if !roles.iter().any(|role| role.id == role_id && !role.is_everyone) {
            return Err(DomainError::RoleNotFound(role_id).into());
        }

        if let Some(taken) = ranks
            .iter()
            .find(|rank| rank.num_invites == num_invites && rank.role_id != role_id)
        {
            return Err(DomainError::DuplicateRankThreshold {
                threshold: num_invites,
                role_id: taken.role_id,
            }
            .into());
        }

        let rank = Rank::new(guild_id, role_id, num_invites);
        deadline::store(limit, "upsert_rank", self.ctx.rank_repo().upsert(&rank)).await?;

        info!(
            guild_id = %guild_id,
            role_id = %role_id,
            num_invites,
            "Rank configured"
        );

        let audit_failure = AuditService::new(self.ctx)
            .record_or_report(
                AuditAction::AddRank,
                guild_id,
                actor_id,
                json!({ "role_id": role_id, "num_invites": num_invites }),
            )
            .await;

        Ok(RankChange { rank, audit_failure })
    }

    /// Detach the rank from a role
    #[instrument(skip(self))]
    pub async fn remove_rank(
        &self,
        guild_id: Snowflake,
        actor_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<RankChange> {
        let limit = self.ctx.store_timeout();
        let rank = deadline::store(limit, "find_rank", self.ctx.rank_repo().find(guild_id, role_id))
            .await?
            .ok_or(DomainError::RankNotFound(role_id))?;

        if !deadline::store(limit, "delete_rank", self.ctx.rank_repo().delete(guild_id, role_id))
            .await?
        {
            return Err(DomainError::RankNotFound(role_id).into());
        }

        info!(guild_id = %guild_id, role_id = %role_id, "Rank removed");

        let audit_failure = AuditService::new(self.ctx)
            .record_or_report(
                AuditAction::RemoveRank,
                guild_id,
                actor_id,
                json!({ "role_id": role_id, "num_invites": rank.num_invites }),
            )
            .await;

        Ok(RankChange { rank, audit_failure })
    }
}
