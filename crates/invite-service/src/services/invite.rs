//! Invite totals and credit adjustments

use invite_core::{
    AuditAction, CustomInvite, InviteCredit, InviteTotal, RepoResult, Snowflake,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::deadline;
use super::error::{ServiceError, ServiceResult};
use super::promotion::{PromotionOutcome, PromotionService};

/// Result of clearing a member's adjustable credit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearedInvites {
    pub member_id: Snowflake,
    pub before: InviteTotal,
    pub after: InviteTotal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_failure: Option<String>,
}

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current total of the three credit sources
    #[instrument(skip(self))]
    pub async fn compute_total(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<InviteTotal> {
        Ok(self.snapshot(guild_id, member_id).await?)
    }

    /// Point-in-time read of all three sources, issued concurrently
    pub(crate) async fn snapshot(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<InviteTotal> {
        let (code, custom, auto) = self.raw_sums(guild_id, member_id).await?;

        let total = InviteCredit::from_sums(guild_id, member_id, code, custom, auto).total();
        debug!(
            guild_id = %guild_id,
            member_id = %member_id,
            code = total.code,
            custom = total.custom,
            auto = total.auto,
            total = total.total,
            "Computed invite total"
        );
        Ok(total)
    }

    /// Unclamped ledger aggregates (code, custom, auto)
    async fn raw_sums(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<(Option<i64>, Option<i64>, Option<i64>)> {
        let limit = self.ctx.store_timeout();
        let ledger = self.ctx.ledger();

        tokio::try_join!(
            deadline::store(limit, "code_uses_sum", ledger.code_uses_sum(guild_id, member_id)),
            deadline::store(limit, "custom_sum", ledger.custom_sum(guild_id, member_id, false)),
            deadline::store(limit, "auto_sum", ledger.custom_sum(guild_id, member_id, true)),
        )
    }

    /// Append a credit adjustment, then re-run promotion for the member
    #[instrument(skip(self, reason))]
    pub async fn add_custom_invites(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        creator_id: Snowflake,
        amount: i64,
        reason: Option<String>,
        generated: bool,
    ) -> ServiceResult<PromotionOutcome> {
        if amount == 0 {
            return Err(ServiceError::validation("amount must not be zero"));
        }

        let adjustment = if generated {
            CustomInvite::generated(guild_id, member_id, amount).with_creator(Some(creator_id))
        } else {
            CustomInvite::manual(guild_id, member_id, creator_id, amount)
        };
        let adjustment = adjustment.with_reason(reason);

        deadline::store(
            self.ctx.store_timeout(),
            "add_custom_invite",
            self.ctx.ledger().add_custom_invite(&adjustment),
        )
        .await?;

        info!(
            guild_id = %guild_id,
            member_id = %member_id,
            creator_id = %creator_id,
            amount,
            generated,
            "Invite credit adjusted"
        );

        let audit_failure = AuditService::new(self.ctx)
            .record_or_report(
                AuditAction::AddInvites,
                guild_id,
                creator_id,
                json!({
                    "target_id": member_id,
                    "amount": amount,
                    "reason": adjustment.reason,
                    "generated": generated,
                }),
            )
            .await;

        let mut outcome = PromotionService::new(self.ctx).promote(guild_id, member_id).await?;
        if outcome.audit_failure.is_none() {
            outcome.audit_failure = audit_failure;
        }
        Ok(outcome)
    }

    /// Offset the member's custom and auto credit so both sum to zero
    ///
    /// Offsets are taken from the raw ledger sums, so a negative balance is
    /// cancelled too. Code-use credit reflects real invite usage and is left
    /// as is. Roles already granted are not revoked.
    #[instrument(skip(self))]
    pub async fn clear_invites(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        creator_id: Snowflake,
    ) -> ServiceResult<ClearedInvites> {
        let (code, raw_custom, raw_auto) = self.raw_sums(guild_id, member_id).await?;
        let before = InviteCredit::from_sums(guild_id, member_id, code, raw_custom, raw_auto).total();
        let raw_custom = raw_custom.unwrap_or(0);
        let raw_auto = raw_auto.unwrap_or(0);
        let reason = Some("clear invites".to_string());

        let mut offsets = Vec::with_capacity(2);
        if raw_custom != 0 {
            offsets.push(
                CustomInvite::manual(guild_id, member_id, creator_id, -raw_custom)
                    .with_reason(reason.clone()),
            );
        }
        if raw_auto != 0 {
            offsets.push(
                CustomInvite::generated(guild_id, member_id, -raw_auto)
                    .with_creator(Some(creator_id))
                    .with_reason(reason),
            );
        }

        for offset in &offsets {
            deadline::store(
                self.ctx.store_timeout(),
                "add_custom_invite",
                self.ctx.ledger().add_custom_invite(offset),
            )
            .await?;
        }

        let after = self.snapshot(guild_id, member_id).await?;
        info!(
            guild_id = %guild_id,
            member_id = %member_id,
            cleared = before.total - after.total,
            "Invite credit cleared"
        );

        let audit_failure = AuditService::new(self.ctx)
            .record_or_report(
                AuditAction::ClearInvites,
                guild_id,
                creator_id,
                json!({
                    "target_id": member_id,
                    "custom": raw_custom,
                    "auto": raw_auto,
                }),
            )
            .await;

        Ok(ClearedInvites {
            member_id,
            before,
            after,
            audit_failure,
        })
    }
}
