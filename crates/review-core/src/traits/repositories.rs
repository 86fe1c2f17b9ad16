//! Repository traits (ports) - define the interface for review storage
//!
//! The whole review, comments and likes included, is one unit of
//! persistence. Writes are compare-and-swap on the review's version so
//! concurrent requests never silently overwrite each other.

use async_trait::async_trait;

use crate::entities::Review;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Listing window over reviews, newest first.
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
    pub category: Option<String>,
}

impl ReviewQuery {
    /// Whether `review` falls inside the cursor window and category filter.
    pub fn matches(&self, review: &Review) -> bool {
        self.before.map_or(true, |before| review.id() < before)
            && self.after.map_or(true, |after| review.id() > after)
            && self
                .category
                .as_deref()
                .map_or(true, |category| review.category() == category)
    }
}

/// Totals across every review a user owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerStats {
    pub total_reviews: i64,
    pub total_likes: i64,
    pub total_comments: i64,
}

impl OwnerStats {
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        reviews.into_iter().fold(Self::default(), |acc, review| Self {
            total_reviews: acc.total_reviews + 1,
            total_likes: acc.total_likes + review.like_count() as i64,
            total_comments: acc.total_comments + review.comments().len() as i64,
        })
    }
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find review by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>>;

    /// List reviews newest first within the query window
    async fn list(&self, query: ReviewQuery) -> RepoResult<Vec<Review>>;

    /// All reviews owned by a user, newest first
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Review>>;

    /// Insert a new review; fails with `ReviewAlreadyExists` on id collision
    async fn create(&self, review: &Review) -> RepoResult<()>;

    /// Replace the stored review if its version still equals `expected_version`.
    ///
    /// The stored version becomes `review.version()`. Fails with
    /// `ConcurrencyConflict` when the versions differ and `ReviewNotFound`
    /// when the review is gone.
    async fn save(&self, review: &Review, expected_version: i64) -> RepoResult<()>;

    /// Delete the review, and everything nested in it, under the same
    /// version check as `save`
    async fn delete(&self, id: Snowflake, expected_version: i64) -> RepoResult<()>;

    /// Aggregate counters over a user's reviews
    async fn owner_stats(&self, owner_id: Snowflake) -> RepoResult<OwnerStats>;

    /// Check the backing store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
