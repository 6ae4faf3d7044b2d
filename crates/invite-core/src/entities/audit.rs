//! Audit log entries - append-only record of credit and rank changes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Kind of change being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    AddInvites,
    ClearInvites,
    AddRank,
    RemoveRank,
    Promote,
}

impl AuditAction {
    /// Value stored in the `action` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddInvites => "ADD_INVITES",
            Self::ClearInvites => "CLEAR_INVITES",
            Self::AddRank => "ADD_RANK",
            Self::RemoveRank => "REMOVE_RANK",
            Self::Promote => "PROMOTE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when a stored action string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown audit action: {0}")]
pub struct UnknownAuditAction(pub String);

impl FromStr for AuditAction {
    type Err = UnknownAuditAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD_INVITES" => Ok(Self::AddInvites),
            "CLEAR_INVITES" => Ok(Self::ClearInvites),
            "ADD_RANK" => Ok(Self::AddRank),
            "REMOVE_RANK" => Ok(Self::RemoveRank),
            "PROMOTE" => Ok(Self::Promote),
            other => Err(UnknownAuditAction(other.to_string())),
        }
    }
}

/// Entry to append; id and timestamp are assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub action: AuditAction,
    pub guild_id: Snowflake,
    pub member_id: Snowflake,
    /// Action-specific payload, never interpreted by the logger
    pub data: JsonValue,
}

/// Persisted audit entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub action: AuditAction,
    pub guild_id: Snowflake,
    pub member_id: Snowflake,
    pub data: JsonValue,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_string_round_trip() {
        for action in [
            AuditAction::AddInvites,
            AuditAction::ClearInvites,
            AuditAction::AddRank,
            AuditAction::RemoveRank,
            AuditAction::Promote,
        ] {
            assert_eq!(action.as_str().parse::<AuditAction>().unwrap(), action);
        }
        assert!("DELETE_EVERYTHING".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_serde_matches_column_value() {
        let json = serde_json::to_string(&AuditAction::AddInvites).unwrap();
        assert_eq!(json, "\"ADD_INVITES\"");
    }
}
