//! Role database model

use sqlx::FromRow;

/// Database model for roles table (live rows only are ever selected)
#[derive(Debug, Clone, FromRow)]
pub struct RoleModel {
    pub id: i64,
    pub guild_id: i64,
    pub name: String,
    pub position: i32,
    pub permissions: i64,
    pub is_everyone: bool,
}
