//! Test fixtures
//!
//! Request bodies and route builders shared by the scenarios.

use invite_core::Snowflake;
use serde::Serialize;

pub use invite_service::testing::{BOT, BRONZE, GOLD, GUILD, OWNER, SILVER};

/// POST body for adding custom credit
#[derive(Debug, Serialize)]
pub struct AdjustInvites {
    pub creator_id: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub generated: bool,
}

impl AdjustInvites {
    pub fn manual(amount: i64) -> Self {
        Self {
            creator_id: OWNER.to_string(),
            amount,
            reason: None,
            generated: false,
        }
    }
}

/// Body carrying only the acting moderator
#[derive(Debug, Serialize)]
pub struct Actor {
    pub creator_id: String,
    pub actor_id: String,
}

impl Actor {
    pub fn owner() -> Self {
        Self {
            creator_id: OWNER.to_string(),
            actor_id: OWNER.to_string(),
        }
    }
}

/// PUT body for a rank
#[derive(Debug, Serialize)]
pub struct SetRank {
    pub actor_id: String,
    pub num_invites: i64,
}

impl SetRank {
    pub fn new(num_invites: i64) -> Self {
        Self {
            actor_id: OWNER.to_string(),
            num_invites,
        }
    }
}

/// POST body for a join
#[derive(Debug, Serialize)]
pub struct RecordJoin {
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
}

pub fn invites_uri(member: Snowflake) -> String {
    format!("/api/v1/guilds/{GUILD}/members/{member}/invites")
}

pub fn promote_uri(member: Snowflake) -> String {
    format!("/api/v1/guilds/{GUILD}/members/{member}/promote")
}

pub fn ranks_uri() -> String {
    format!("/api/v1/guilds/{GUILD}/ranks")
}

pub fn rank_uri(role: Snowflake) -> String {
    format!("/api/v1/guilds/{GUILD}/ranks/{role}")
}

pub fn joins_uri() -> String {
    format!("/api/v1/guilds/{GUILD}/joins")
}
