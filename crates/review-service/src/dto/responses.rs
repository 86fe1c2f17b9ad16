//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use review_core::ReactionKind;
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, before: Option<String>, after: Option<String>, has_more: bool, limit: i32) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                after,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for the next (older) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Cursor for the previous (newer) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i32,
}

// ============================================================================
// Review Responses
// ============================================================================

/// Full review with its comments
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub rating: f64,
    pub category: String,
    pub comments: Vec<CommentResponse>,
    pub liked_by: Vec<String>,
    pub like_count: usize,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of toggling a like
#[derive(Debug, Clone, Serialize)]
pub struct LikeToggleResponse {
    pub review_id: String,
    pub liked: bool,
    pub like_count: usize,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// One comment. `reactions` maps each glyph to the ids of users holding it.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub edited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
    pub reactions: BTreeMap<ReactionKind, Vec<String>>,
    pub reaction_counts: ReactionCountsResponse,
}

/// Per-kind reaction counts keyed by glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionCountsResponse {
    #[serde(rename = "👍")]
    pub like: usize,
    #[serde(rename = "❤️")]
    pub love: usize,
    #[serde(rename = "😂")]
    pub laugh: usize,
}

/// Result of toggling a reaction
#[derive(Debug, Clone, Serialize)]
pub struct ReactionToggleResponse {
    pub comment_id: String,
    pub reaction: ReactionKind,
    /// `true` if the reaction was added, `false` if it was removed
    pub added: bool,
    pub counts: ReactionCountsResponse,
}

// ============================================================================
// Profile Responses
// ============================================================================

/// Aggregated activity on a user's reviews
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStatsResponse {
    pub user_id: String,
    pub total_reviews: i64,
    pub total_likes: i64,
    pub total_comments: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health of each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
