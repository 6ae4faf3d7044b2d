//! Role entity <-> model mapper

use invite_core::entities::Role;
use invite_core::value_objects::{Permissions, Snowflake};

use crate::models::RoleModel;

/// Convert RoleModel to Role entity
impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: Snowflake::new(model.id),
            guild_id: Snowflake::new(model.guild_id),
            name: model.name,
            position: model.position,
            permissions: Permissions::from_i64(model.permissions),
            is_everyone: model.is_everyone,
        }
    }
}
