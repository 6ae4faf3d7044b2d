//! Invite credit and promotion handlers

use axum::{
    extract::{Path, State},
    Json,
};
use invite_service::dto::{
    AdjustInvitesRequest, ApiResponse, ClearInvitesRequest, ClearInvitesResponse,
    InviteTotalResponse, PromotionResponse,
};
use invite_service::services::{InviteService, PromotionService};

use crate::extractors::{GuildMemberPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Current invite total of a member
///
/// GET /guilds/{guild_id}/members/{member_id}/invites
pub async fn get_invite_total(
    State(state): State<AppState>,
    Path(path): Path<GuildMemberPath>,
) -> ApiResult<Json<ApiResponse<InviteTotalResponse>>> {
    let (guild_id, member_id) = path.ids()?;

    let total = InviteService::new(state.service_context())
        .compute_total(guild_id, member_id)
        .await?;
    Ok(Json(ApiResponse::new(InviteTotalResponse::new(member_id, &total))))
}

/// Add custom invite credit, then re-evaluate the member
///
/// POST /guilds/{guild_id}/members/{member_id}/invites
pub async fn add_invites(
    State(state): State<AppState>,
    Path(path): Path<GuildMemberPath>,
    ValidatedJson(body): ValidatedJson<AdjustInvitesRequest>,
) -> ApiResult<Json<ApiResponse<PromotionResponse>>> {
    let (guild_id, member_id) = path.ids()?;

    let outcome = InviteService::new(state.service_context())
        .add_custom_invites(
            guild_id,
            member_id,
            body.creator_id,
            body.amount,
            body.reason,
            body.generated,
        )
        .await?;
    Ok(Json(ApiResponse::new(outcome.into())))
}

/// Clear a member's custom and auto credit
///
/// DELETE /guilds/{guild_id}/members/{member_id}/invites
pub async fn clear_invites(
    State(state): State<AppState>,
    Path(path): Path<GuildMemberPath>,
    Json(body): Json<ClearInvitesRequest>,
) -> ApiResult<Json<ApiResponse<ClearInvitesResponse>>> {
    let (guild_id, member_id) = path.ids()?;

    let cleared = InviteService::new(state.service_context())
        .clear_invites(guild_id, member_id, body.creator_id)
        .await?;
    Ok(Json(ApiResponse::new(cleared.into())))
}

/// Run the promotion flow for a member
///
/// POST /guilds/{guild_id}/members/{member_id}/promote
pub async fn promote_member(
    State(state): State<AppState>,
    Path(path): Path<GuildMemberPath>,
) -> ApiResult<Json<ApiResponse<PromotionResponse>>> {
    let (guild_id, member_id) = path.ids()?;

    let outcome = PromotionService::new(state.service_context())
        .promote(guild_id, member_id)
        .await?;
    Ok(Json(ApiResponse::new(outcome.into())))
}
