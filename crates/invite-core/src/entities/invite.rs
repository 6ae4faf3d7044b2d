//! Invite code entity - the code-based credit source

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// An invite link owned by a member; every use credits the inviter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCode {
    pub code: String,
    pub guild_id: Snowflake,
    pub inviter_id: Snowflake,
    pub uses: i32,
    pub created_at: DateTime<Utc>,
}

impl InviteCode {
    pub fn new(code: impl Into<String>, guild_id: Snowflake, inviter_id: Snowflake) -> Self {
        Self {
            code: code.into(),
            guild_id,
            inviter_id,
            uses: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_uses(mut self, uses: i32) -> Self {
        self.uses = uses.max(0);
        self
    }

    /// Codes are scoped to a guild; a code from another guild never credits anyone here
    #[inline]
    pub fn belongs_to(&self, guild_id: Snowflake) -> bool {
        self.guild_id == guild_id
    }
}
