//! # review-db
//!
//! Storage layer implementing `ReviewRepository`.
//!
//! - `PgReviewRepository` keeps one row per review with the comments as a
//!   JSONB array and `liked_by` as `BIGINT[]`
//! - `InMemoryReviewRepository` keeps reviews in a `DashMap`, for tests and
//!   single-process demos
//!
//! Both apply the same compare-and-swap on the review's `version`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use review_db::{create_pool, run_migrations, DatabaseConfig, PgReviewRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let reviews = PgReviewRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{InMemoryReviewRepository, PgReviewRepository};
