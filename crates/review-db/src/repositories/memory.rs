//! In-memory implementation of ReviewRepository
//!
//! Each review lives in one `DashMap` entry, so the version check and the
//! replacement happen under that entry's shard lock.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, instrument};

use review_core::entities::Review;
use review_core::error::DomainError;
use review_core::traits::{OwnerStats, RepoResult, ReviewQuery, ReviewRepository};
use review_core::value_objects::Snowflake;

use super::error::stale_write;

const MAX_PAGE: i64 = 100;

/// Process-local review store
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewRepository {
    reviews: Arc<DashMap<Snowflake, Review>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    fn newest_first(&self, keep: impl Fn(&Review) -> bool) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        reviews.sort_by_key(|review| std::cmp::Reverse(review.id()));
        reviews
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>> {
        Ok(self.reviews.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ReviewQuery) -> RepoResult<Vec<Review>> {
        let limit = query.limit.clamp(1, MAX_PAGE) as usize;
        let mut reviews = self.newest_first(|review| query.matches(review));

        // With only an `after` cursor the page is the one right past it.
        if query.before.is_none() && query.after.is_some() && reviews.len() > limit {
            reviews.drain(..reviews.len() - limit);
        } else {
            reviews.truncate(limit);
        }
        Ok(reviews)
    }

    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Review>> {
        Ok(self.newest_first(|review| review.owner_id() == owner_id))
    }

    #[instrument(skip(self, review), fields(review_id = %review.id()))]
    async fn create(&self, review: &Review) -> RepoResult<()> {
        match self.reviews.entry(review.id()) {
            Entry::Occupied(_) => Err(DomainError::ReviewAlreadyExists(review.id())),
            Entry::Vacant(slot) => {
                slot.insert(review.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self, review), fields(review_id = %review.id(), version = review.version()))]
    async fn save(&self, review: &Review, expected_version: i64) -> RepoResult<()> {
        let Some(mut stored) = self.reviews.get_mut(&review.id()) else {
            return Err(DomainError::ReviewNotFound(review.id()));
        };
        if stored.version() != expected_version {
            debug!(stored_version = stored.version(), expected_version, "Stale write rejected");
            return Err(DomainError::ConcurrencyConflict(review.id()));
        }
        *stored = review.clone();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, expected_version: i64) -> RepoResult<()> {
        if self
            .reviews
            .remove_if(&id, |_, stored| stored.version() == expected_version)
            .is_some()
        {
            return Ok(());
        }
        Err(stale_write(id, self.reviews.contains_key(&id)))
    }

    async fn owner_stats(&self, owner_id: Snowflake) -> RepoResult<OwnerStats> {
        let owned = self.newest_first(|review| review.owner_id() == owner_id);
        Ok(OwnerStats::from_reviews(&owned))
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
