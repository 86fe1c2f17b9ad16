//! Review row model and the embedded comment document

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use review_core::Snowflake;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: f64,
    pub category: String,
    pub comments: Json<Vec<CommentDocument>>,
    pub liked_by: Vec<i64>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One element of the `comments` JSONB array.
///
/// `reactions` is keyed by emoji glyph, e.g. `{"👍": ["12"], "❤️": [], "😂": []}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDocument {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reactions: BTreeMap<String, Vec<Snowflake>>,
}
