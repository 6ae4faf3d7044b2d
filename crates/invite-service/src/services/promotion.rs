//! Promotion flow
//!
//! total + rank table + live roles + held roles → evaluation → grant → audit.

use std::collections::{BTreeSet, HashSet};

use invite_core::{evaluate, AuditAction, InviteTotal, PromotionResult, Snowflake};
use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::deadline;
use super::error::{ServiceError, ServiceResult};
use super::invite::InviteService;
use super::role_sync::RoleSyncService;

/// What happened to the qualifying roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "role_ids", rename_all = "snake_case")]
pub enum GrantStatus {
    /// Roles added to the member (empty when nothing was due)
    Granted(BTreeSet<Snowflake>),
    /// The member qualifies but the bot may not manage roles
    Withheld(BTreeSet<Snowflake>),
}

/// Full result of one promotion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionOutcome {
    pub member_id: Snowflake,
    pub total: InviteTotal,
    pub result: PromotionResult,
    pub grant: GrantStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_failure: Option<String>,
}

impl PromotionOutcome {
    /// Roles granted by this run
    pub fn granted(&self) -> BTreeSet<Snowflake> {
        match &self.grant {
            GrantStatus::Granted(ids) => ids.clone(),
            GrantStatus::Withheld(_) => BTreeSet::new(),
        }
    }

    pub fn is_withheld(&self) -> bool {
        matches!(self.grant, GrantStatus::Withheld(_))
    }
}

pub struct PromotionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PromotionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Evaluate the member against the guild's ranks and grant what is due
    ///
    /// # Errors
    /// - `StoreUnavailable` if any read fails; nothing is granted
    /// - `RoleServiceUnavailable` if the grant fails
    ///
    /// A missing MANAGE_ROLES permission is not an error: the outcome is
    /// `GrantStatus::Withheld`.
    #[instrument(skip(self))]
    pub async fn promote(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<PromotionOutcome> {
        let limit = self.ctx.store_timeout();
        let invites = InviteService::new(self.ctx);

        let (total, ranks, live_roles, owned) = tokio::try_join!(
            invites.snapshot(guild_id, member_id),
            deadline::store(limit, "find_ranks", self.ctx.rank_repo().find_by_guild(guild_id)),
            deadline::store(limit, "find_roles", self.ctx.role_repo().find_by_guild(guild_id)),
            deadline::store(
                limit,
                "get_role_ids",
                self.ctx.member_repo().get_role_ids(guild_id, member_id)
            ),
        )?;

        let owned: HashSet<Snowflake> = owned.into_iter().collect();
        let result = evaluate(&ranks, &live_roles, &owned, total.total);

        for stale in &result.stale_ranks {
            warn!(
                guild_id = %guild_id,
                role_id = %stale.role_id,
                num_invites = stale.num_invites,
                "Rank points at a role that no longer exists"
            );
        }

        let grant = match RoleSyncService::new(self.ctx)
            .apply_promotion(guild_id, member_id, &result.qualifying_role_ids)
            .await
        {
            Ok(outcome) => GrantStatus::Granted(outcome.granted),
            Err(ServiceError::PermissionDenied { withheld, .. }) => {
                GrantStatus::Withheld(withheld.into_iter().collect())
            }
            Err(e) => return Err(e),
        };

        let audit_failure = match &grant {
            GrantStatus::Granted(granted) if !granted.is_empty() => {
                info!(
                    guild_id = %guild_id,
                    member_id = %member_id,
                    total = total.total,
                    granted = granted.len(),
                    "Member promoted"
                );
                AuditService::new(self.ctx)
                    .record_or_report(
                        AuditAction::Promote,
                        guild_id,
                        member_id,
                        json!({ "role_ids": granted, "total": total.total }),
                    )
                    .await
            }
            _ => None,
        };

        Ok(PromotionOutcome {
            member_id,
            total,
            result,
            grant,
            audit_failure,
        })
    }
}
