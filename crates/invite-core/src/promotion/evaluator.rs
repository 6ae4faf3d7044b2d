//! Rank evaluation
//!
//! Given a member's invite total, the guild's configured ranks, the guild's
//! live roles and the roles the member already holds, decide:
//!
//! - which roles the member newly qualifies for (`num_invites <= total`,
//!   role still live, not already held);
//! - which unattained rank is the nearest goal (lowest `num_invites` above
//!   the total, first encountered wins on equal thresholds);
//! - which ranks point at roles that no longer exist.
//!
//! Evaluation is a pure function of its inputs and performs no I/O.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::entities::{Rank, Role};
use crate::value_objects::Snowflake;

/// Outcome of evaluating one member against the guild's rank table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PromotionResult {
    /// Roles to grant; roles the member already holds are never listed
    pub qualifying_role_ids: BTreeSet<Snowflake>,
    /// Nearest rank not yet reached
    pub next_rank: Option<Rank>,
    /// Display name of `next_rank`'s role, empty when there is none
    pub next_rank_name: String,
    /// All configured ranks, stale ones included
    pub rank_count: usize,
    /// Ranks whose role was deleted from the guild
    pub stale_ranks: Vec<Rank>,
}

impl PromotionResult {
    /// Nothing new to grant
    #[inline]
    pub fn is_up_to_date(&self) -> bool {
        self.qualifying_role_ids.is_empty()
    }

    /// Invites still needed for the next rank
    pub fn remaining_to_next(&self, total: i64) -> Option<i64> {
        self.next_rank.map(|rank| rank.remaining(total))
    }
}

/// Evaluate `total` against `ranks`
pub fn evaluate(
    ranks: &[Rank],
    live_roles: &[Role],
    owned_role_ids: &HashSet<Snowflake>,
    total: i64,
) -> PromotionResult {
    let roles_by_id: HashMap<Snowflake, &Role> =
        live_roles.iter().map(|role| (role.id, role)).collect();

    let mut result = PromotionResult {
        rank_count: ranks.len(),
        ..PromotionResult::default()
    };
    let mut next: Option<(&Rank, &Role)> = None;

    for rank in ranks {
        let Some(role) = roles_by_id.get(&rank.role_id).copied() else {
            result.stale_ranks.push(*rank);
            continue;
        };

        if rank.is_reached_by(total) {
            if !owned_role_ids.contains(&role.id) {
                result.qualifying_role_ids.insert(role.id);
            }
            continue;
        }

        // Strict comparison keeps the first of several equal thresholds
        match next {
            Some((current, _)) if rank.num_invites >= current.num_invites => {}
            _ => next = Some((rank, role)),
        }
    }

    if let Some((rank, role)) = next {
        result.next_rank = Some(*rank);
        result.next_rank_name.clone_from(&role.name);
    }

    result
}
