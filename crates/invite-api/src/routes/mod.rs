//! Route definitions
//!
//! API routes are mounted under /api/v1; health checks sit at the root.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, invites, joins, ranks};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(member_routes())
        .merge(rank_routes())
        .merge(join_routes())
}

/// Invite credit and promotion of a single member
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guilds/:guild_id/members/:member_id/invites",
            get(invites::get_invite_total)
                .post(invites::add_invites)
                .delete(invites::clear_invites),
        )
        .route(
            "/guilds/:guild_id/members/:member_id/promote",
            post(invites::promote_member),
        )
}

/// Rank table
fn rank_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds/:guild_id/ranks", get(ranks::list_ranks))
        .route(
            "/guilds/:guild_id/ranks/:role_id",
            put(ranks::set_rank).delete(ranks::remove_rank),
        )
}

/// Joins and join statistics
fn join_routes() -> Router<AppState> {
    Router::new()
        .route("/guilds/:guild_id/joins", post(joins::record_join))
        .route("/guilds/:guild_id/joins/daily", get(joins::daily_joins))
}
