//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates domain
//! operations over the repository ports.

pub mod audit;
pub mod context;
mod deadline;
pub mod error;
pub mod invite;
pub mod join;
pub mod permission;
pub mod promotion;
pub mod rank;
pub mod role_sync;

pub use audit::AuditService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invite::{ClearedInvites, InviteService};
pub use join::{JoinOutcome, JoinService};
pub use permission::PermissionService;
pub use promotion::{GrantStatus, PromotionOutcome, PromotionService};
pub use rank::{RankChange, RankService, RankView};
pub use role_sync::{GrantOutcome, RoleSyncService};
