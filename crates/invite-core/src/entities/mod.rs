//! Domain entities - core business objects

mod audit;
mod credit;
mod guild;
mod invite;
mod join;
mod rank;
mod role;

pub use audit::{AuditAction, AuditEntry, NewAuditEntry, UnknownAuditAction};
pub use credit::{CustomInvite, InviteCredit, InviteTotal};
pub use guild::Guild;
pub use invite::InviteCode;
pub use join::{DailyJoinCount, MemberJoin};
pub use rank::Rank;
pub use role::Role;
