//! Review service
//!
//! Handles review creation, listing, partial updates, deletion and likes.

use review_core::traits::ReviewQuery;
use review_core::{DomainError, NewReview, Review, ReviewChanges, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CreateReviewRequest, LikeToggleResponse, ReviewResponse, UpdateReviewRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Load a review, apply `op`, and write it back if the stored version has
/// not moved in between.
///
/// A lost race surfaces as `ConcurrencyConflict`; nothing is retried here.
pub(crate) async fn commit<T>(
    ctx: &ServiceContext,
    review_id: Snowflake,
    op: impl FnOnce(&mut Review) -> Result<T, DomainError>,
) -> ServiceResult<(Review, T)> {
    let mut review = load(ctx, review_id).await?;
    let outcome = op(&mut review)?;
    let expected = review.stage_write();

    match ctx.review_repo().save(&review, expected).await {
        Ok(()) => Ok((review, outcome)),
        Err(e) => {
            if e.is_concurrency_conflict() {
                warn!(review_id = %review_id, expected_version = expected, "Write conflict");
            }
            Err(e.into())
        }
    }
}

pub(crate) async fn load(ctx: &ServiceContext, review_id: Snowflake) -> ServiceResult<Review> {
    ctx.review_repo()
        .find_by_id(review_id)
        .await?
        .ok_or_else(|| DomainError::ReviewNotFound(review_id).into())
}

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a new review owned by `owner_id`
    #[instrument(skip(self, request))]
    pub async fn create_review(
        &self,
        owner_id: Snowflake,
        request: CreateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        request.validate()?;

        let review = Review::create(self.ctx.generate_id(), owner_id, NewReview::from(request))?;
        self.ctx.review_repo().create(&review).await?;

        info!(review_id = %review.id(), owner_id = %owner_id, "Review created");
        Ok(ReviewResponse::from(review))
    }

    /// List reviews newest first
    #[instrument(skip(self))]
    pub async fn list_reviews(&self, query: ReviewQuery) -> ServiceResult<Vec<ReviewResponse>> {
        let reviews = self.ctx.review_repo().list(query).await?;
        Ok(reviews.iter().map(ReviewResponse::from).collect())
    }

    /// Reviews owned by the caller, newest first
    #[instrument(skip(self))]
    pub async fn list_my_reviews(&self, caller_id: Snowflake) -> ServiceResult<Vec<ReviewResponse>> {
        let reviews = self.ctx.review_repo().find_by_owner(caller_id).await?;
        Ok(reviews.iter().map(ReviewResponse::from).collect())
    }

    /// Get a review by ID
    #[instrument(skip(self))]
    pub async fn get_review(&self, review_id: Snowflake) -> ServiceResult<ReviewResponse> {
        load(self.ctx, review_id).await.map(ReviewResponse::from)
    }

    /// Apply a partial update (owner only)
    #[instrument(skip(self, request))]
    pub async fn update_review(
        &self,
        caller_id: Snowflake,
        review_id: Snowflake,
        request: UpdateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        request.validate()?;
        let changes = ReviewChanges::from(request);
        if changes.is_empty() {
            return Err(ServiceError::validation("No fields to update"));
        }

        let (review, ()) = commit(self.ctx, review_id, |review| {
            review.update(caller_id, changes)
        })
        .await?;

        info!(review_id = %review_id, version = review.version(), "Review updated");
        Ok(ReviewResponse::from(review))
    }

    /// Delete a review with all its comments and reactions (owner only)
    #[instrument(skip(self))]
    pub async fn delete_review(&self, caller_id: Snowflake, review_id: Snowflake) -> ServiceResult<()> {
        let review = load(self.ctx, review_id).await?;
        let cascade = review.delete(caller_id)?;
        self.ctx
            .review_repo()
            .delete(review_id, review.version())
            .await?;

        info!(
            review_id = %review_id,
            comments = cascade.comments,
            reactions = cascade.reactions,
            likes = cascade.likes,
            "Review deleted"
        );
        Ok(())
    }

    /// Like the review, or take the like back
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        caller_id: Snowflake,
        review_id: Snowflake,
    ) -> ServiceResult<LikeToggleResponse> {
        let (review, liked) =
            commit(self.ctx, review_id, |review| review.toggle_like(caller_id)).await?;

        info!(review_id = %review_id, user_id = %caller_id, liked, "Like toggled");
        Ok(LikeToggleResponse {
            review_id: review_id.to_string(),
            liked,
            like_count: review.like_count(),
        })
    }
}
