//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit_log;
mod guild;
mod invite;
mod join;
mod rank;
mod role;

pub use audit_log::AuditLogModel;
pub use guild::GuildModel;
pub use invite::InviteModel;
pub use join::DailyJoinModel;
pub use rank::RankModel;
pub use role::RoleModel;
