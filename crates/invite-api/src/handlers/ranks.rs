//! Rank configuration handlers

use axum::{
    extract::{Path, State},
    Json,
};
use invite_service::dto::{
    ApiResponse, RankChangeResponse, RankResponse, RemoveRankRequest, SetRankRequest,
};
use invite_service::services::RankService;

use crate::extractors::{GuildIdPath, GuildRolePath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Ranks of a guild, lowest threshold first
///
/// GET /guilds/{guild_id}/ranks
pub async fn list_ranks(
    State(state): State<AppState>,
    Path(path): Path<GuildIdPath>,
) -> ApiResult<Json<ApiResponse<Vec<RankResponse>>>> {
    let guild_id = path.guild_id()?;

    let ranks = RankService::new(state.service_context())
        .list_ranks(guild_id)
        .await?;
    Ok(Json(ApiResponse::new(
        ranks.into_iter().map(RankResponse::from).collect(),
    )))
}

/// Attach a threshold to a role
///
/// PUT /guilds/{guild_id}/ranks/{role_id}
pub async fn set_rank(
    State(state): State<AppState>,
    Path(path): Path<GuildRolePath>,
    ValidatedJson(body): ValidatedJson<SetRankRequest>,
) -> ApiResult<Json<ApiResponse<RankChangeResponse>>> {
    let change = RankService::new(state.service_context())
        .set_rank(path.guild_id()?, body.actor_id, path.role_id()?, body.num_invites)
        .await?;
    Ok(Json(ApiResponse::new(change.into())))
}

/// Detach a role's rank
///
/// DELETE /guilds/{guild_id}/ranks/{role_id}
pub async fn remove_rank(
    State(state): State<AppState>,
    Path(path): Path<GuildRolePath>,
    Json(body): Json<RemoveRankRequest>,
) -> ApiResult<Json<ApiResponse<RankChangeResponse>>> {
    let change = RankService::new(state.service_context())
        .remove_rank(path.guild_id()?, body.actor_id, path.role_id()?)
        .await?;
    Ok(Json(ApiResponse::new(change.into())))
}
