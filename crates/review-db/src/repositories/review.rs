//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use review_core::entities::Review;
use review_core::error::DomainError;
use review_core::traits::{OwnerStats, RepoResult, ReviewQuery, ReviewRepository};
use review_core::value_objects::Snowflake;

use crate::mappers::ReviewRow;
use crate::models::ReviewModel;

use super::error::{map_db_error, map_unique_violation, stale_write};

const MAX_PAGE: i64 = 100;

const SELECT_REVIEW: &str = r"
    SELECT id, user_id, title, description, image, rating, category,
           comments, liked_by, version, created_at, updated_at
    FROM reviews
";

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reviews WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    fn into_reviews(models: Vec<ReviewModel>) -> RepoResult<Vec<Review>> {
        models.into_iter().map(Review::try_from).collect()
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>> {
        let model = sqlx::query_as::<_, ReviewModel>(&format!("{SELECT_REVIEW} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        model.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ReviewQuery) -> RepoResult<Vec<Review>> {
        let limit = query.limit.clamp(1, MAX_PAGE);
        let category = query.category.as_deref();

        let models = match (query.before, query.after) {
            (None, Some(after)) => {
                // Oldest-first just past the cursor, flipped below.
                let mut rows = sqlx::query_as::<_, ReviewModel>(&format!(
                    "{SELECT_REVIEW}
                     WHERE id > $1 AND ($2::TEXT IS NULL OR category = $2)
                     ORDER BY id ASC
                     LIMIT $3"
                ))
                .bind(after.into_inner())
                .bind(category)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;
                rows.reverse();
                rows
            }
            (before, _) => sqlx::query_as::<_, ReviewModel>(&format!(
                "{SELECT_REVIEW}
                 WHERE ($1::BIGINT IS NULL OR id < $1) AND ($2::TEXT IS NULL OR category = $2)
                 ORDER BY id DESC
                 LIMIT $3"
            ))
            .bind(before.map(Snowflake::into_inner))
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?,
        };

        Self::into_reviews(models)
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Review>> {
        let models = sqlx::query_as::<_, ReviewModel>(&format!(
            "{SELECT_REVIEW} WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::into_reviews(models)
    }

    #[instrument(skip(self, review), fields(review_id = %review.id()))]
    async fn create(&self, review: &Review) -> RepoResult<()> {
        let row = ReviewRow::from(review);
        sqlx::query(
            r"
            INSERT INTO reviews (id, user_id, title, description, image, rating, category,
                                 comments, liked_by, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.image)
        .bind(row.rating)
        .bind(&row.category)
        .bind(Json(&row.comments))
        .bind(&row.liked_by)
        .bind(row.version)
        .bind(review.created_at())
        .bind(review.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReviewAlreadyExists(review.id())))?;

        Ok(())
    }

    #[instrument(skip(self, review), fields(review_id = %review.id(), version = review.version()))]
    async fn save(&self, review: &Review, expected_version: i64) -> RepoResult<()> {
        let row = ReviewRow::from(review);
        let result = sqlx::query(
            r"
            UPDATE reviews
            SET title = $3, description = $4, image = $5, rating = $6, category = $7,
                comments = $8, liked_by = $9, version = $10, updated_at = $11
            WHERE id = $1 AND version = $2
            ",
        )
        .bind(row.id)
        .bind(expected_version)
        .bind(&row.title)
        .bind(&row.description)
        .bind(&row.image)
        .bind(row.rating)
        .bind(&row.category)
        .bind(Json(&row.comments))
        .bind(&row.liked_by)
        .bind(row.version)
        .bind(review.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            debug!(expected_version, "Versioned update matched no row");
            return Err(stale_write(review.id(), self.exists(review.id()).await?));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, expected_version: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND version = $2")
            .bind(id.into_inner())
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(stale_write(id, self.exists(id).await?));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn owner_stats(&self, owner_id: Snowflake) -> RepoResult<OwnerStats> {
        let (total_reviews, total_likes, total_comments) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r"
                SELECT COUNT(*)::BIGINT,
                       COALESCE(SUM(cardinality(liked_by)), 0)::BIGINT,
                       COALESCE(SUM(jsonb_array_length(comments)), 0)::BIGINT
                FROM reviews
                WHERE user_id = $1
                ",
            )
            .bind(owner_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(OwnerStats {
            total_reviews,
            total_likes,
            total_comments,
        })
    }

    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
