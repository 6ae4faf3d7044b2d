//! # invite-db
//!
//! PostgreSQL implementations of the invite engine's repository traits via SQLx.
//!
//! - Connection pool management and bundled migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use invite_db::{create_pool, PgInviteLedger, PoolConfig};
//! use invite_core::traits::InviteLedger;
//!
//! async fn example(config: &PoolConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     let ledger = PgInviteLedger::new(pool);
//!     let manual = ledger.custom_sum(guild_id, member_id, false).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAuditLogRepository, PgGuildRepository, PgInviteCodeRepository, PgInviteLedger,
    PgJoinRepository, PgMemberRepository, PgRankRepository, PgRoleRepository,
};
