//! Comment entity - a remark left on a review

use chrono::{DateTime, Utc};

use super::reaction::{ReactionKind, ReactionLedger, ReactionToggle};
use crate::access::{authorize, Action};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Longest accepted comment, counted in characters after trimming.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Trim `text` and check it is a publishable comment body.
pub fn normalize_comment_text(text: &str) -> Result<String, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyCommentText);
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::CommentTooLong {
            max: MAX_COMMENT_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Comment entity
///
/// `edited_at` doubles as the edited flag: it is set on the first edit and
/// refreshed on every later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub reactions: ReactionLedger,
}

impl Comment {
    /// Create a new Comment with validated text
    pub fn new(id: Snowflake, author_id: Snowflake, text: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            author_id,
            text: normalize_comment_text(text)?,
            created_at: Utc::now(),
            edited_at: None,
            reactions: ReactionLedger::new(),
        })
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Replace the text. Only the author may edit; reactions survive.
    pub fn edit(&mut self, requester: Snowflake, text: &str) -> Result<(), DomainError> {
        authorize(requester, self.author_id, Action::EditComment)?;
        self.text = normalize_comment_text(text)?;
        self.edited_at = Some(Utc::now());
        Ok(())
    }

    /// Toggle `requester`'s reaction. Anyone may react, the author included.
    pub fn react(&mut self, requester: Snowflake, kind: ReactionKind) -> ReactionToggle {
        self.reactions.toggle(requester, kind)
    }
}
