//! Pagination extractor
//!
//! Extracts cursor-based pagination parameters and the review listing
//! filter from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use review_core::traits::ReviewQuery;
use review_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i32 = 50;
/// Maximum page size
const MAX_LIMIT: i32 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Get items before this ID
    #[serde(default)]
    pub before: Option<String>,
    /// Get items after this ID
    #[serde(default)]
    pub after: Option<String>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i32>,
}

/// Validated pagination parameters
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Get items before this ID
    pub before: Option<Snowflake>,
    /// Get items after this ID
    pub after: Option<Snowflake>,
    /// Maximum number of items to return (validated to 1-100)
    pub limit: i32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Combine with a category filter into a repository query
    pub fn into_query(self, filter: ReviewFilter) -> ReviewQuery {
        ReviewQuery {
            before: self.before,
            after: self.after,
            limit: i64::from(self.limit),
            category: filter.category,
        }
    }
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let before = params
            .before
            .map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'before' cursor format"))
            })
            .transpose()?;

        let after = params
            .after
            .map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'after' cursor format"))
            })
            .transpose()?;

        if before.is_some() && after.is_some() {
            return Err(ApiError::invalid_query(
                "Use either 'before' or 'after', not both",
            ));
        }

        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        Ok(Pagination {
            before,
            after,
            limit,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}

/// Optional `category` filter for review listings. A blank value means no filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewFilter {
    #[serde(default)]
    pub category: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for ReviewFilter
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(filter) = Query::<ReviewFilter>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Self {
            category: filter
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let pagination = Pagination::default();
        assert_eq!(pagination.limit, DEFAULT_LIMIT);
        assert!(pagination.before.is_none());
        assert!(pagination.after.is_none());
    }

    fn limit_only(limit: i32) -> Pagination {
        Pagination::try_from(PaginationParams {
            before: None,
            after: None,
            limit: Some(limit),
        })
        .unwrap()
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(limit_only(200).limit, MAX_LIMIT);
        assert_eq!(limit_only(0).limit, 1);
    }

    #[test]
    fn test_pagination_from_params() {
        let params = PaginationParams {
            before: Some("123456789".to_string()),
            after: None,
            limit: Some(25),
        };

        let pagination = Pagination::try_from(params).unwrap();
        assert_eq!(pagination.before, Some(Snowflake(123_456_789)));
        assert!(pagination.after.is_none());
        assert_eq!(pagination.limit, 25);
    }

    #[test]
    fn test_rejects_malformed_cursor() {
        let params = PaginationParams {
            before: None,
            after: Some("yesterday".to_string()),
            limit: None,
        };
        let err = Pagination::try_from(params).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY_PARAMETER");
    }

    #[test]
    fn test_rejects_both_cursors() {
        let params = PaginationParams {
            before: Some("900".to_string()),
            after: Some("100".to_string()),
            limit: None,
        };
        let err = Pagination::try_from(params).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY_PARAMETER");
    }

    #[test]
    fn test_into_query_carries_filter() {
        let query = limit_only(10).into_query(ReviewFilter {
            category: Some("Books".into()),
        });
        assert_eq!(query.limit, 10);
        assert_eq!(query.category.as_deref(), Some("Books"));
    }
}
