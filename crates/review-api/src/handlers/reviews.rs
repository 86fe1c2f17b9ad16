//! Review handlers
//!
//! Endpoints for review CRUD and likes.

use axum::{
    extract::{Path, State},
    Json,
};
use review_service::dto::{
    CreateReviewRequest, LikeToggleResponse, PaginatedResponse, ReviewResponse, UpdateReviewRequest,
};
use review_service::ReviewService;

use crate::extractors::{AuthUser, Pagination, ReviewFilter, ReviewPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::retry::retry_on_conflict;
use crate::state::AppState;

/// List reviews, newest first
///
/// GET /reviews?before=&after=&limit=&category=
pub async fn list_reviews(
    State(state): State<AppState>,
    pagination: Pagination,
    filter: ReviewFilter,
) -> ApiResult<Json<PaginatedResponse<ReviewResponse>>> {
    let limit = pagination.limit;
    let service = ReviewService::new(state.service_context());
    let reviews = service.list_reviews(pagination.into_query(filter)).await?;

    // `before` continues towards older reviews, `after` towards newer ones.
    let after = reviews.first().map(|r| r.id.clone());
    let before = reviews.last().map(|r| r.id.clone());
    let has_more = reviews.len() == usize::try_from(limit).unwrap_or(usize::MAX);

    Ok(Json(PaginatedResponse::new(reviews, before, after, has_more, limit)))
}

/// Create review
///
/// POST /reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<Created<Json<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.create_review(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Caller's own reviews
///
/// GET /reviews/mine
pub async fn list_my_reviews(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let reviews = service.list_my_reviews(auth.user_id).await?;
    Ok(Json(reviews))
}

/// Get review by ID
///
/// GET /reviews/{review_id}
pub async fn get_review(
    State(state): State<AppState>,
    Path(path): Path<ReviewPath>,
) -> ApiResult<Json<ReviewResponse>> {
    let review_id = path.review_id()?;
    let service = ReviewService::new(state.service_context());
    Ok(Json(service.get_review(review_id).await?))
}

/// Partially update review
///
/// PATCH /reviews/{review_id}
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ReviewPath>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let review_id = path.review_id()?;
    let service = ReviewService::new(state.service_context());
    let response = retry_on_conflict(state.conflict_retries(), || {
        service.update_review(auth.user_id, review_id, request.clone())
    })
    .await?;
    Ok(Json(response))
}

/// Delete review with its comments, reactions and likes
///
/// DELETE /reviews/{review_id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ReviewPath>,
) -> ApiResult<NoContent> {
    let review_id = path.review_id()?;
    let service = ReviewService::new(state.service_context());
    retry_on_conflict(state.conflict_retries(), || {
        service.delete_review(auth.user_id, review_id)
    })
    .await?;
    Ok(NoContent)
}

/// Toggle the caller's like
///
/// PUT /reviews/{review_id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ReviewPath>,
) -> ApiResult<Json<LikeToggleResponse>> {
    let review_id = path.review_id()?;
    let service = ReviewService::new(state.service_context());
    let response = retry_on_conflict(state.conflict_retries(), || {
        service.toggle_like(auth.user_id, review_id)
    })
    .await?;
    Ok(Json(response))
}
