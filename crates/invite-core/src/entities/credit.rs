//! Invite credit - the three additive sources behind a member's invite total

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Summed credit per source for one member of one guild
///
/// Adjustment rows may carry negative deltas, so a raw sum can dip below
/// zero. Every source is clamped at zero here, at the store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviteCredit {
    pub guild_id: Snowflake,
    pub member_id: Snowflake,
    pub code: i64,
    pub custom: i64,
    pub auto: i64,
}

impl InviteCredit {
    /// Build from raw aggregates; `None` means the source had no rows
    pub fn from_sums(
        guild_id: Snowflake,
        member_id: Snowflake,
        code: Option<i64>,
        custom: Option<i64>,
        auto: Option<i64>,
    ) -> Self {
        Self {
            guild_id,
            member_id,
            code: code.unwrap_or(0).max(0),
            custom: custom.unwrap_or(0).max(0),
            auto: auto.unwrap_or(0).max(0),
        }
    }

    pub fn total(&self) -> InviteTotal {
        InviteTotal::new(self.code, self.custom, self.auto)
    }
}

/// Authoritative invite count for a single evaluation
///
/// Never cached: credit can change between two calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InviteTotal {
    pub code: i64,
    pub custom: i64,
    pub auto: i64,
    pub total: i64,
}

impl InviteTotal {
    pub fn new(code: i64, custom: i64, auto: i64) -> Self {
        Self {
            code,
            custom,
            auto,
            total: code.saturating_add(custom).saturating_add(auto),
        }
    }
}

/// A manual or system-generated credit adjustment row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomInvite {
    pub guild_id: Snowflake,
    pub member_id: Snowflake,
    pub creator_id: Option<Snowflake>,
    /// Signed delta
    pub amount: i64,
    pub reason: Option<String>,
    /// `true` for system adjustments (counted as auto credit)
    pub generated: bool,
    pub created_at: DateTime<Utc>,
}

impl CustomInvite {
    /// Adjustment entered by a moderator
    pub fn manual(
        guild_id: Snowflake,
        member_id: Snowflake,
        creator_id: Snowflake,
        amount: i64,
    ) -> Self {
        Self {
            guild_id,
            member_id,
            creator_id: Some(creator_id),
            amount,
            reason: None,
            generated: false,
            created_at: Utc::now(),
        }
    }

    /// Adjustment produced by the system itself
    pub fn generated(guild_id: Snowflake, member_id: Snowflake, amount: i64) -> Self {
        Self {
            guild_id,
            member_id,
            creator_id: None,
            amount,
            reason: None,
            generated: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    pub fn with_creator(mut self, creator_id: Option<Snowflake>) -> Self {
        self.creator_id = creator_id;
        self
    }
}
