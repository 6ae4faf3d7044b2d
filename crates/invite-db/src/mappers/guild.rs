//! Guild entity <-> model mapper

use invite_core::entities::Guild;
use invite_core::value_objects::Snowflake;

use crate::models::GuildModel;

impl From<GuildModel> for Guild {
    fn from(model: GuildModel) -> Self {
        Guild::new(
            Snowflake::new(model.id),
            model.name,
            Snowflake::new(model.owner_id),
        )
    }
}
