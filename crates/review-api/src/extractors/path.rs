//! Path parameter extractors
//!
//! Snowflake ids arrive as strings; a malformed id is a 400, not a 404.

use review_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, field: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {field} format")))
}

/// Path parameters with review_id
#[derive(Debug, Deserialize)]
pub struct ReviewPath {
    pub review_id: String,
}

impl ReviewPath {
    /// Parse review_id as Snowflake
    pub fn review_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.review_id, "review_id")
    }
}

/// Path parameters with review_id and comment_id
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub review_id: String,
    pub comment_id: String,
}

impl CommentPath {
    /// Parse review_id as Snowflake
    pub fn review_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.review_id, "review_id")
    }

    /// Parse comment_id as Snowflake
    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub user_id: String,
}

impl UserPath {
    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}
