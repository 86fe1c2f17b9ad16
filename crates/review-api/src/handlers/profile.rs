//! Profile handlers

use axum::{
    extract::{Path, State},
    Json,
};
use review_service::dto::ProfileStatsResponse;
use review_service::ProfileService;

use crate::extractors::{AuthUser, UserPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Activity totals for any user
///
/// GET /users/{user_id}/stats
pub async fn get_user_stats(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiResult<Json<ProfileStatsResponse>> {
    let user_id = path.user_id()?;
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.stats(user_id).await?))
}

/// Activity totals for the caller
///
/// GET /users/@me/stats
pub async fn get_my_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileStatsResponse>> {
    let service = ProfileService::new(state.service_context());
    Ok(Json(service.stats(auth.user_id).await?))
}
