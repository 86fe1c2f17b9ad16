//! Profile service
//!
//! Activity totals are aggregated from the user's reviews on every read.

use review_core::Snowflake;
use tracing::instrument;

use crate::dto::ProfileStatsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Review, like and comment totals for `user_id`.
    ///
    /// Users with no reviews get zeros rather than a not-found error.
    #[instrument(skip(self))]
    pub async fn stats(&self, user_id: Snowflake) -> ServiceResult<ProfileStatsResponse> {
        let stats = self.ctx.review_repo().owner_stats(user_id).await?;
        Ok(ProfileStatsResponse::new(user_id, stats))
    }
}
