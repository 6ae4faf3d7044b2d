//! Entity to model mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - `*Insert` structs: flatten entity data into bind values

mod audit_log;
mod guild;
mod invite;
mod rank;
mod role;

pub use invite::{CustomInviteInsert, JoinInsert};
