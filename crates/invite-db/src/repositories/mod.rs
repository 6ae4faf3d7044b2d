//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in invite-core.

mod audit_log;
mod error;
mod guild;
mod invite;
mod join;
mod ledger;
mod member;
mod rank;
mod role;

pub use audit_log::PgAuditLogRepository;
pub use guild::PgGuildRepository;
pub use invite::PgInviteCodeRepository;
pub use join::PgJoinRepository;
pub use ledger::PgInviteLedger;
pub use member::PgMemberRepository;
pub use rank::PgRankRepository;
pub use role::PgRoleRepository;
