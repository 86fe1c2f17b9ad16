//! Domain errors - the failure kinds every review operation can produce

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Review not found: {0}")]
    ReviewNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Comment text cannot be empty")]
    EmptyCommentText,

    #[error("Comment too long: max {max} characters")]
    CommentTooLong { max: usize },

    #[error("Rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),

    #[error("Invalid reaction kind: {0:?}")]
    InvalidReactionKind(String),

    #[error("Field cannot be empty: {0}")]
    EmptyField(&'static str),

    #[error("Image must be a URL, got {0:?}")]
    InvalidImageUrl(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the review owner can perform this action")]
    NotReviewOwner,

    #[error("Only the comment author can perform this action")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Review {0} was modified concurrently")]
    ConcurrencyConflict(Snowflake),

    #[error("Review already exists: {0}")]
    ReviewAlreadyExists(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyCommentText => "EMPTY_COMMENT",
            Self::CommentTooLong { .. } => "COMMENT_TOO_LONG",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::InvalidReactionKind(_) => "INVALID_REACTION",
            Self::EmptyField(_) => "EMPTY_FIELD",
            Self::InvalidImageUrl(_) => "INVALID_IMAGE_URL",

            Self::NotReviewOwner => "NOT_REVIEW_OWNER",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            Self::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            Self::ReviewAlreadyExists(_) => "REVIEW_ALREADY_EXISTS",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ReviewNotFound(_) | Self::CommentNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyCommentText
                | Self::CommentTooLong { .. }
                | Self::InvalidRating(_)
                | Self::InvalidReactionKind(_)
                | Self::EmptyField(_)
                | Self::InvalidImageUrl(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotReviewOwner | Self::NotCommentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ConcurrencyConflict(_) | Self::ReviewAlreadyExists(_)
        )
    }

    /// Lost an optimistic-concurrency race; the only error worth retrying.
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict(_))
    }
}
