//! Join recording and statistics handlers

use axum::{
    extract::{Path, State},
    Json,
};
use invite_service::dto::{
    ApiResponse, DailyJoinResponse, DailyJoinsQuery, JoinResponse, RecordJoinRequest,
};
use invite_service::services::JoinService;

use crate::extractors::{GuildIdPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Record a member joining, crediting the inviter when a code was used
///
/// POST /guilds/{guild_id}/joins
pub async fn record_join(
    State(state): State<AppState>,
    Path(path): Path<GuildIdPath>,
    ValidatedJson(body): ValidatedJson<RecordJoinRequest>,
) -> ApiResult<Created<Json<ApiResponse<JoinResponse>>>> {
    let guild_id = path.guild_id()?;

    let outcome = JoinService::new(state.service_context())
        .record_join(guild_id, body.member_id, body.invite_code.as_deref())
        .await?;
    Ok(Created(Json(ApiResponse::new(outcome.into()))))
}

/// Joins per day, oldest first
///
/// GET /guilds/{guild_id}/joins/daily?days=N
pub async fn daily_joins(
    State(state): State<AppState>,
    Path(path): Path<GuildIdPath>,
    ValidatedQuery(query): ValidatedQuery<DailyJoinsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<DailyJoinResponse>>>> {
    let guild_id = path.guild_id()?;

    let counts = JoinService::new(state.service_context())
        .daily_joins(guild_id, query.days)
        .await?;
    Ok(Json(ApiResponse::new(
        counts.into_iter().map(DailyJoinResponse::from).collect(),
    )))
}
