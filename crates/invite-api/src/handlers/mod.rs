//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod invites;
pub mod joins;
pub mod ranks;
