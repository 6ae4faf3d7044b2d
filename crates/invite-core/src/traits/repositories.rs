//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; the infrastructure layer
//! provides the implementation. Every method is a self-contained
//! request/response so callers can issue independent reads concurrently.

use async_trait::async_trait;

use crate::entities::{
    AuditEntry, CustomInvite, DailyJoinCount, Guild, InviteCode, MemberJoin, NewAuditEntry, Rank,
    Role,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Invite Ledger
// ============================================================================

/// The three credit sources behind an invite total
///
/// Sums return `None` when no rows match; callers treat that as zero.
#[async_trait]
pub trait InviteLedger: Send + Sync {
    /// Sum of uses over every invite code the member created in the guild
    async fn code_uses_sum(&self, guild_id: Snowflake, member_id: Snowflake)
        -> RepoResult<Option<i64>>;

    /// Sum of custom adjustments, either manual (`generated = false`) or automatic
    async fn custom_sum(
        &self,
        guild_id: Snowflake,
        member_id: Snowflake,
        generated: bool,
    ) -> RepoResult<Option<i64>>;

    /// Append an adjustment row
    async fn add_custom_invite(&self, adjustment: &CustomInvite) -> RepoResult<()>;
}

// ============================================================================
// Invite Code Repository
// ============================================================================

#[async_trait]
pub trait InviteCodeRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<InviteCode>>;

    /// Atomically add one use
    async fn increment_uses(&self, code: &str) -> RepoResult<()>;
}

// ============================================================================
// Rank Repository
// ============================================================================

#[async_trait]
pub trait RankRepository: Send + Sync {
    /// All ranks of a guild, in no particular order
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Rank>>;

    /// Rank attached to a role, if any
    async fn find(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<Option<Rank>>;

    /// Insert or replace the rank keyed by (guild, role)
    async fn upsert(&self, rank: &Rank) -> RepoResult<()>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, guild_id: Snowflake, role_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Role Directory
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Roles that currently exist in the guild, @everyone included
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<Role>>;
}

// ============================================================================
// Guild Repository
// ============================================================================

#[async_trait]
pub trait GuildRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Guild>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Role ids currently held by the member (empty for unknown members)
    async fn get_role_ids(&self, guild_id: Snowflake, user_id: Snowflake)
        -> RepoResult<Vec<Snowflake>>;

    /// Grant several roles in one call; already-held roles are left untouched
    async fn add_roles(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> RepoResult<()>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append an entry; the store assigns id and timestamp
    async fn create(&self, entry: &NewAuditEntry) -> RepoResult<AuditEntry>;
}

// ============================================================================
// Join Repository
// ============================================================================

#[async_trait]
pub trait JoinRepository: Send + Sync {
    async fn create(&self, join: &MemberJoin) -> RepoResult<()>;

    /// Join counts for the `limit` most recent days that have joins, newest first
    async fn daily_counts(&self, guild_id: Snowflake, limit: i64)
        -> RepoResult<Vec<DailyJoinCount>>;
}
