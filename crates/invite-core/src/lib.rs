//! # invite-core
//!
//! Domain layer for invite accounting and rank promotion: entities, value
//! objects, repository traits and the pure promotion evaluator.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod promotion;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuditAction, AuditEntry, CustomInvite, DailyJoinCount, Guild, InviteCode, InviteCredit,
    InviteTotal, MemberJoin, NewAuditEntry, Rank, Role,
};
pub use error::DomainError;
pub use promotion::{evaluate, PromotionResult};
pub use traits::{
    AuditLogRepository, GuildRepository, InviteCodeRepository, InviteLedger, JoinRepository,
    MemberRepository, RankRepository, RepoResult, RoleRepository,
};
pub use value_objects::{Permissions, Snowflake, SnowflakeParseError};
