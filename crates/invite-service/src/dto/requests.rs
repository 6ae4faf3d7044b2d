//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use invite_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Invite Credit Requests
// ============================================================================

/// Add (or subtract) custom invite credit
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdjustInvitesRequest {
    /// Moderator entering the adjustment
    pub creator_id: Snowflake,

    /// Signed delta; zero is rejected by the service
    #[validate(range(min = -1_000_000, max = 1_000_000, message = "amount out of range"))]
    pub amount: i64,

    #[validate(length(max = 200, message = "Reason must be at most 200 characters"))]
    pub reason: Option<String>,

    /// Count the adjustment as auto credit
    #[serde(default)]
    pub generated: bool,
}

/// Clear a member's custom and auto credit
#[derive(Debug, Clone, Deserialize)]
pub struct ClearInvitesRequest {
    pub creator_id: Snowflake,
}

// ============================================================================
// Rank Requests
// ============================================================================

/// Attach a threshold to a role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetRankRequest {
    pub actor_id: Snowflake,

    #[validate(range(min = 0, message = "num_invites must not be negative"))]
    pub num_invites: i64,
}

/// Detach a role's rank
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveRankRequest {
    pub actor_id: Snowflake,
}

// ============================================================================
// Join Requests
// ============================================================================

/// A member joined the guild
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordJoinRequest {
    pub member_id: Snowflake,

    #[validate(length(min = 1, max = 32, message = "Invite code must be 1-32 characters"))]
    pub invite_code: Option<String>,
}

/// Query string of the joins-per-day endpoint
///
/// The upper bound is `JOIN_STATS_MAX_DAYS`, enforced by the join service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DailyJoinsQuery {
    #[validate(range(min = 1, message = "days must be at least 1"))]
    pub days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_request_validation() {
        let valid: AdjustInvitesRequest =
            serde_json::from_str(r#"{"creator_id":"1","amount":-5,"reason":"spam"}"#).unwrap();
        assert!(valid.validate().is_ok());
        assert!(!valid.generated);

        let huge = AdjustInvitesRequest {
            amount: 5_000_000,
            ..valid.clone()
        };
        assert!(huge.validate().is_err());

        let long_reason = AdjustInvitesRequest {
            reason: Some("x".repeat(201)),
            ..valid
        };
        assert!(long_reason.validate().is_err());
    }

    #[test]
    fn test_set_rank_request_validation() {
        let valid = SetRankRequest {
            actor_id: Snowflake::new(1),
            num_invites: 0,
        };
        assert!(valid.validate().is_ok());

        let negative = SetRankRequest {
            num_invites: -1,
            ..valid
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_record_join_request() {
        let with_code: RecordJoinRequest =
            serde_json::from_str(r#"{"member_id":60,"invite_code":"abc"}"#).unwrap();
        assert!(with_code.validate().is_ok());

        let without: RecordJoinRequest = serde_json::from_str(r#"{"member_id":"60"}"#).unwrap();
        assert!(without.invite_code.is_none());
        assert!(without.validate().is_ok());

        let empty = RecordJoinRequest {
            invite_code: Some(String::new()),
            ..without
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_daily_joins_query_bounds() {
        assert!(DailyJoinsQuery::default().validate().is_ok());
        assert!(DailyJoinsQuery { days: Some(60) }.validate().is_ok());
        assert!(DailyJoinsQuery { days: Some(90) }.validate().is_ok());
        assert!(DailyJoinsQuery { days: Some(0) }.validate().is_err());
    }
}
