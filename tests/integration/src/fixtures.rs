//! Test fixtures and data generators
//!
//! Request bodies and the subset of response fields the tests inspect.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create review request
#[derive(Debug, Serialize)]
pub struct CreateReviewRequest {
    pub title: String,
    pub description: String,
    pub rating: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CreateReviewRequest {
    pub fn unique() -> Self {
        Self::in_category("Films")
    }

    pub fn in_category(category: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Review {suffix}"),
            description: format!("Thoughts number {suffix}"),
            rating: 4.0,
            category: category.to_string(),
            image: None,
        }
    }
}

/// Comment body; `text` and `comment` are both accepted by the server
#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub text: String,
}

impl CommentRequest {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Reaction toggle body
#[derive(Debug, Serialize)]
pub struct ReactRequest {
    pub reaction: String,
}

impl ReactRequest {
    pub fn new(reaction: &str) -> Self {
        Self {
            reaction: reaction.to_string(),
        }
    }
}

/// Review response
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: f64,
    pub category: String,
    pub comments: Vec<CommentBody>,
    pub liked_by: Vec<String>,
    pub like_count: usize,
    pub version: i64,
}

/// Reaction totals keyed by glyph
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct CountsBody {
    #[serde(rename = "👍")]
    pub like: usize,
    #[serde(rename = "❤️")]
    pub love: usize,
    #[serde(rename = "😂")]
    pub laugh: usize,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub edited: bool,
    pub edited_at: Option<String>,
    pub reactions: BTreeMap<String, Vec<String>>,
    pub reaction_counts: CountsBody,
}

/// Like toggle response
#[derive(Debug, Deserialize)]
pub struct LikeBody {
    pub review_id: String,
    pub liked: bool,
    pub like_count: usize,
}

/// Reaction toggle response
#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub comment_id: String,
    pub reaction: String,
    pub added: bool,
    pub counts: CountsBody,
}

/// Profile stats response
#[derive(Debug, Deserialize)]
pub struct StatsBody {
    pub user_id: String,
    pub total_reviews: i64,
    pub total_likes: i64,
    pub total_comments: i64,
}

/// Paginated listing
#[derive(Debug, Deserialize)]
pub struct PageBody<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub before: Option<String>,
    pub after: Option<String>,
    pub has_more: bool,
    pub limit: i32,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
