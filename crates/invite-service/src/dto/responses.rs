//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Invite Responses
// ============================================================================

/// Invite total broken down by source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteTotalResponse {
    pub member_id: String,
    pub code: i64,
    pub custom: i64,
    pub auto: i64,
    pub total: i64,
}

/// Result of clearing a member's adjustable credit
#[derive(Debug, Clone, Serialize)]
pub struct ClearInvitesResponse {
    pub member_id: String,
    pub before: InviteTotalResponse,
    pub after: InviteTotalResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_failure: Option<String>,
}

// ============================================================================
// Promotion Responses
// ============================================================================

/// Nearest rank the member has not reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextRankResponse {
    pub role_id: String,
    pub name: String,
    pub num_invites: i64,
    pub remaining: i64,
}

/// Outcome of one promotion run
#[derive(Debug, Clone, Serialize)]
pub struct PromotionResponse {
    pub member_id: String,
    pub invites: InviteTotalResponse,
    pub granted_role_ids: Vec<String>,
    /// Roles the member qualifies for but the bot may not grant
    pub withheld_role_ids: Vec<String>,
    pub next_rank: Option<NextRankResponse>,
    pub rank_count: usize,
    pub stale_rank_role_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_failure: Option<String>,
}

// ============================================================================
// Rank Responses
// ============================================================================

/// Configured rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankResponse {
    pub role_id: String,
    pub num_invites: i64,
    pub role_name: Option<String>,
    pub stale: bool,
}

/// Rank after a configuration change
#[derive(Debug, Clone, Serialize)]
pub struct RankChangeResponse {
    pub role_id: String,
    pub num_invites: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_failure: Option<String>,
}

// ============================================================================
// Join Responses
// ============================================================================

/// A recorded join
#[derive(Debug, Clone, Serialize)]
pub struct JoinResponse {
    pub member_id: String,
    pub inviter_id: Option<String>,
    pub invite_code: Option<String>,
    pub joined_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inviter_promotion: Option<PromotionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_error: Option<String>,
}

/// Joins on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyJoinResponse {
    pub day: NaiveDate,
    /// `d.m.yyyy`
    pub label: String,
    pub total: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
