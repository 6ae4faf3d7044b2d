//! Invite entity <-> model mapper

use invite_core::entities::{CustomInvite, InviteCode, MemberJoin};
use invite_core::value_objects::Snowflake;

use crate::models::InviteModel;

/// Convert InviteModel to InviteCode entity
impl From<InviteModel> for InviteCode {
    fn from(model: InviteModel) -> Self {
        InviteCode {
            code: model.code,
            guild_id: Snowflake::new(model.guild_id),
            inviter_id: Snowflake::new(model.inviter_id),
            uses: model.uses.max(0),
            created_at: model.created_at,
        }
    }
}

/// Bind values for a custom_invites row
pub struct CustomInviteInsert<'a> {
    pub guild_id: i64,
    pub member_id: i64,
    pub creator_id: Option<i64>,
    pub amount: i64,
    pub reason: Option<&'a str>,
    pub generated: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> CustomInviteInsert<'a> {
    pub fn new(adjustment: &'a CustomInvite) -> Self {
        Self {
            guild_id: adjustment.guild_id.into_inner(),
            member_id: adjustment.member_id.into_inner(),
            creator_id: adjustment.creator_id.map(Snowflake::into_inner),
            amount: adjustment.amount,
            reason: adjustment.reason.as_deref(),
            generated: adjustment.generated,
            created_at: adjustment.created_at,
        }
    }
}

/// Bind values for a joins row
pub struct JoinInsert<'a> {
    pub guild_id: i64,
    pub member_id: i64,
    pub inviter_id: Option<i64>,
    pub invite_code: Option<&'a str>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> JoinInsert<'a> {
    pub fn new(join: &'a MemberJoin) -> Self {
        Self {
            guild_id: join.guild_id.into_inner(),
            member_id: join.member_id.into_inner(),
            inviter_id: join.inviter_id.map(Snowflake::into_inner),
            invite_code: join.invite_code.as_deref(),
            created_at: join.created_at,
        }
    }
}
