//! Role entity - a live role in the guild's role directory

use crate::value_objects::{Permissions, Snowflake};

/// Role as currently present in the guild
///
/// Ranks reference roles by id only. A rank whose role is no longer in the
/// directory is a stale reference and is ignored during promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    pub position: i32,
    pub permissions: Permissions,
    pub is_everyone: bool,
}

impl Role {
    pub fn new(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id,
            name: name.into(),
            position: 0,
            permissions: Permissions::empty(),
            is_everyone: false,
        }
    }

    /// The implicit role every member holds
    pub fn everyone(guild_id: Snowflake, permissions: Permissions) -> Self {
        // @everyone shares its id with the guild
        Self {
            id: guild_id,
            guild_id,
            name: "@everyone".to_string(),
            position: 0,
            permissions,
            is_everyone: true,
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn has_permission(&self, permission: Permissions) -> bool {
        self.permissions.has(permission)
    }
}
