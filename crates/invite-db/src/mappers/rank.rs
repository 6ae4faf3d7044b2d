//! Rank and join-statistics mappers

use invite_core::entities::{DailyJoinCount, Rank};
use invite_core::value_objects::Snowflake;

use crate::models::{DailyJoinModel, RankModel};

impl From<RankModel> for Rank {
    fn from(model: RankModel) -> Self {
        Rank::new(
            Snowflake::new(model.guild_id),
            Snowflake::new(model.role_id),
            model.num_invites,
        )
    }
}

impl From<DailyJoinModel> for DailyJoinCount {
    fn from(model: DailyJoinModel) -> Self {
        DailyJoinCount {
            day: model.day,
            total: model.total,
        }
    }
}
