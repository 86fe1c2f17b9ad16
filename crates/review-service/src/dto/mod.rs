//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting the review aggregate to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreateReviewRequest, ReactToCommentRequest, UpdateCommentRequest,
    UpdateReviewRequest,
};

pub use responses::{
    CommentResponse, HealthChecks, HealthResponse, LikeToggleResponse,
    PaginatedResponse, PaginationMeta, ProfileStatsResponse, ReactionCountsResponse,
    ReactionToggleResponse, ReadinessResponse, ReviewResponse,
};
