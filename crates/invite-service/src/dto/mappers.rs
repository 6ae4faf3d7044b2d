//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities and service outcomes to
//! response DTOs.

use std::collections::BTreeSet;

use invite_core::{DailyJoinCount, InviteTotal, Snowflake};

use super::responses::{
    ClearInvitesResponse, DailyJoinResponse, InviteTotalResponse, JoinResponse, NextRankResponse,
    PromotionResponse, RankChangeResponse, RankResponse,
};
use crate::services::{
    ClearedInvites, GrantStatus, JoinOutcome, PromotionOutcome, RankChange, RankView,
};

fn id_strings<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Snowflake>,
{
    ids.into_iter().map(ToString::to_string).collect()
}

// ============================================================================
// Invite Mappers
// ============================================================================

impl InviteTotalResponse {
    pub fn new(member_id: Snowflake, total: &InviteTotal) -> Self {
        Self {
            member_id: member_id.to_string(),
            code: total.code,
            custom: total.custom,
            auto: total.auto,
            total: total.total,
        }
    }
}

impl From<ClearedInvites> for ClearInvitesResponse {
    fn from(cleared: ClearedInvites) -> Self {
        Self {
            member_id: cleared.member_id.to_string(),
            before: InviteTotalResponse::new(cleared.member_id, &cleared.before),
            after: InviteTotalResponse::new(cleared.member_id, &cleared.after),
            audit_failure: cleared.audit_failure,
        }
    }
}

// ============================================================================
// Promotion Mappers
// ============================================================================

impl From<&PromotionOutcome> for PromotionResponse {
    fn from(outcome: &PromotionOutcome) -> Self {
        let empty = BTreeSet::new();
        let (granted, withheld) = match &outcome.grant {
            GrantStatus::Granted(ids) => (ids, &empty),
            GrantStatus::Withheld(ids) => (&empty, ids),
        };

        let next_rank = outcome.result.next_rank.map(|rank| NextRankResponse {
            role_id: rank.role_id.to_string(),
            name: outcome.result.next_rank_name.clone(),
            num_invites: rank.num_invites,
            remaining: rank.remaining(outcome.total.total),
        });

        Self {
            member_id: outcome.member_id.to_string(),
            invites: InviteTotalResponse::new(outcome.member_id, &outcome.total),
            granted_role_ids: id_strings(granted),
            withheld_role_ids: id_strings(withheld),
            next_rank,
            rank_count: outcome.result.rank_count,
            stale_rank_role_ids: id_strings(outcome.result.stale_ranks.iter().map(|r| &r.role_id)),
            audit_failure: outcome.audit_failure.clone(),
        }
    }
}

impl From<PromotionOutcome> for PromotionResponse {
    fn from(outcome: PromotionOutcome) -> Self {
        Self::from(&outcome)
    }
}

// ============================================================================
// Rank Mappers
// ============================================================================

impl From<RankView> for RankResponse {
    fn from(view: RankView) -> Self {
        Self {
            role_id: view.role_id.to_string(),
            num_invites: view.num_invites,
            role_name: view.role_name,
            stale: view.stale,
        }
    }
}

impl From<RankChange> for RankChangeResponse {
    fn from(change: RankChange) -> Self {
        Self {
            role_id: change.rank.role_id.to_string(),
            num_invites: change.rank.num_invites,
            audit_failure: change.audit_failure,
        }
    }
}

// ============================================================================
// Join Mappers
// ============================================================================

impl From<JoinOutcome> for JoinResponse {
    fn from(outcome: JoinOutcome) -> Self {
        Self {
            member_id: outcome.member_id.to_string(),
            inviter_id: outcome.inviter_id.map(|id| id.to_string()),
            invite_code: outcome.invite_code,
            joined_at: outcome.joined_at,
            inviter_promotion: outcome.inviter_promotion.map(PromotionResponse::from),
            promotion_error: outcome.promotion_error,
        }
    }
}

impl From<DailyJoinCount> for DailyJoinResponse {
    fn from(count: DailyJoinCount) -> Self {
        Self {
            day: count.day,
            label: count.label(),
            total: count.total,
        }
    }
}
