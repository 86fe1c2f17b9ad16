//! Comment handlers
//!
//! Endpoints for comments and their reactions.

use axum::{
    extract::{Path, State},
    Json,
};
use review_service::dto::{
    CommentResponse, CreateCommentRequest, ReactToCommentRequest, ReactionToggleResponse,
    UpdateCommentRequest,
};
use review_service::CommentService;

use crate::extractors::{AuthUser, CommentPath, ReviewPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::retry::retry_on_conflict;
use crate::state::AppState;

/// Comments on a review in posting order
///
/// GET /reviews/{review_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(path): Path<ReviewPath>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let review_id = path.review_id()?;
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_comments(review_id).await?))
}

/// Add comment
///
/// POST /reviews/{review_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ReviewPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let review_id = path.review_id()?;
    let service = CommentService::new(state.service_context());
    let response = retry_on_conflict(state.conflict_retries(), || {
        service.add_comment(auth.user_id, review_id, request.clone())
    })
    .await?;
    Ok(Created(Json(response)))
}

/// Edit comment
///
/// PATCH /reviews/{review_id}/comments/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let review_id = path.review_id()?;
    let comment_id = path.comment_id()?;
    let service = CommentService::new(state.service_context());
    let response = retry_on_conflict(state.conflict_retries(), || {
        service.edit_comment(auth.user_id, review_id, comment_id, request.clone())
    })
    .await?;
    Ok(Json(response))
}

/// Delete comment
///
/// DELETE /reviews/{review_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentPath>,
) -> ApiResult<NoContent> {
    let review_id = path.review_id()?;
    let comment_id = path.comment_id()?;
    let service = CommentService::new(state.service_context());
    retry_on_conflict(state.conflict_retries(), || {
        service.delete_comment(auth.user_id, review_id, comment_id)
    })
    .await?;
    Ok(NoContent)
}

/// Toggle the caller's reaction
///
/// POST /reviews/{review_id}/comments/{comment_id}/reactions
pub async fn react_to_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentPath>,
    ValidatedJson(request): ValidatedJson<ReactToCommentRequest>,
) -> ApiResult<Json<ReactionToggleResponse>> {
    let review_id = path.review_id()?;
    let comment_id = path.comment_id()?;
    let service = CommentService::new(state.service_context());
    let response = retry_on_conflict(state.conflict_retries(), || {
        service.react_to_comment(auth.user_id, review_id, comment_id, request.clone())
    })
    .await?;
    Ok(Json(response))
}
