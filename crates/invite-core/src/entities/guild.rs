//! Guild entity - the tenancy boundary for invites and ranks

use crate::value_objects::Snowflake;

/// Guild (server) as seen by the promotion engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
}

impl Guild {
    pub fn new(id: Snowflake, name: impl Into<String>, owner_id: Snowflake) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id,
        }
    }

    /// Guild owners implicitly hold every permission
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owner() {
        let guild = Guild::new(Snowflake::new(1), "Test Guild", Snowflake::new(100));
        assert!(guild.is_owner(Snowflake::new(100)));
        assert!(!guild.is_owner(Snowflake::new(200)));
    }
}
