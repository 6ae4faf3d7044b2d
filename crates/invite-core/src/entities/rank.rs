//! Rank entity - a (threshold, role) reward tier

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// "A member with at least `num_invites` invites qualifies for `role_id`"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rank {
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
    pub num_invites: i64,
}

impl Rank {
    pub fn new(guild_id: Snowflake, role_id: Snowflake, num_invites: i64) -> Self {
        Self {
            guild_id,
            role_id,
            num_invites,
        }
    }

    /// Inclusive boundary: reaching the threshold exactly qualifies
    #[inline]
    pub fn is_reached_by(&self, total: i64) -> bool {
        self.num_invites <= total
    }

    /// Invites still missing to reach this rank (0 once reached)
    #[inline]
    pub fn remaining(&self, total: i64) -> i64 {
        (self.num_invites - total).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_inclusive() {
        let rank = Rank::new(Snowflake::new(1), Snowflake::new(2), 100);
        assert!(rank.is_reached_by(100));
        assert!(rank.is_reached_by(101));
        assert!(!rank.is_reached_by(99));
    }

    #[test]
    fn test_remaining() {
        let rank = Rank::new(Snowflake::new(1), Snowflake::new(2), 250);
        assert_eq!(rank.remaining(100), 150);
        assert_eq!(rank.remaining(300), 0);
    }
}
