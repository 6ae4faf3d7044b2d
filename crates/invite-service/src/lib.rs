//! # invite-service
//!
//! Application layer: invite totals, the promotion flow, rank configuration
//! and join statistics, plus the DTOs exchanged with the HTTP layer.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
