//! Member joins - one row per join event, used for attribution and stats

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

/// A member joining a guild, optionally through someone's invite code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberJoin {
    pub guild_id: Snowflake,
    pub member_id: Snowflake,
    pub inviter_id: Option<Snowflake>,
    pub invite_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MemberJoin {
    pub fn new(guild_id: Snowflake, member_id: Snowflake) -> Self {
        Self {
            guild_id,
            member_id,
            inviter_id: None,
            invite_code: None,
            created_at: Utc::now(),
        }
    }

    pub fn via(mut self, code: impl Into<String>, inviter_id: Snowflake) -> Self {
        self.invite_code = Some(code.into());
        self.inviter_id = Some(inviter_id);
        self
    }
}

/// Number of joins on one calendar day (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyJoinCount {
    pub day: NaiveDate,
    pub total: i64,
}

impl DailyJoinCount {
    /// Short `d.m.yyyy` label used by chart renderers
    pub fn label(&self) -> String {
        self.day.format("%-d.%-m.%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_via_code() {
        let join = MemberJoin::new(Snowflake::new(1), Snowflake::new(2)).via("abc", Snowflake::new(3));
        assert_eq!(join.invite_code.as_deref(), Some("abc"));
        assert_eq!(join.inviter_id, Some(Snowflake::new(3)));
    }

    #[test]
    fn test_daily_label() {
        let day = DailyJoinCount {
            day: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            total: 12,
        };
        assert_eq!(day.label(), "7.3.2024");
    }
}
