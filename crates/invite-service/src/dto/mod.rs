//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AdjustInvitesRequest, ClearInvitesRequest, DailyJoinsQuery, RecordJoinRequest,
    RemoveRankRequest, SetRankRequest,
};

pub use responses::{
    ApiResponse, ClearInvitesResponse, DailyJoinResponse, HealthChecks, HealthResponse,
    InviteTotalResponse, JoinResponse, NextRankResponse, PromotionResponse, RankChangeResponse,
    RankResponse, ReadinessResponse,
};
