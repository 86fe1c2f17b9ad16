//! Request DTOs for API endpoints
//!
//! Shape checks live here; trimming and the rules that depend on stored
//! state are enforced by the review aggregate.

use review_core::{NewReview, ReviewChanges};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Review Requests
// ============================================================================

/// Post a new review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: String,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,

    /// Image URL, already uploaded to the CDN
    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            rating: request.rating,
            category: request.category,
            image: request.image,
        }
    }
}

/// Partial review update; omitted fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,

    /// New image URL, or an empty string to remove the image
    pub image: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewChanges {
    fn from(request: UpdateReviewRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            rating: request.rating,
            category: request.category,
            image: request.image,
        }
    }
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Add a comment. `comment` is accepted as an alias of `text`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(alias = "comment")]
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub text: String,
}

/// Replace a comment's text
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[serde(alias = "comment")]
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub text: String,
}

/// Toggle a reaction. `reaction` is an emoji glyph or its word label;
/// unknown kinds are rejected when parsed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactToCommentRequest {
    #[validate(length(min = 1, message = "Reaction cannot be empty"))]
    pub reaction: String,
}
