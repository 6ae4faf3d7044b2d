//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    /// `AuditAction` in its SCREAMING_SNAKE form
    pub action: String,
    pub guild_id: i64,
    pub member_id: i64,
    pub data: JsonValue,
    pub created_at: DateTime<Utc>,
}
