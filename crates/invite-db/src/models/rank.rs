//! Rank database model

use sqlx::FromRow;

/// Database model for ranks table
#[derive(Debug, Clone, Copy, FromRow)]
pub struct RankModel {
    pub guild_id: i64,
    pub role_id: i64,
    pub num_invites: i64,
}
