//! The single ownership predicate behind every mutating review operation.

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Everything a caller can do to a review or one of its comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    UpdateReview,
    DeleteReview,
    LikeReview,
    AddComment,
    EditComment,
    DeleteComment,
    ReactToComment,
}

impl Action {
    /// Whether the caller must be the resource's owner (review owner or
    /// comment author).
    pub const fn requires_ownership(self) -> bool {
        matches!(
            self,
            Self::UpdateReview | Self::DeleteReview | Self::EditComment | Self::DeleteComment
        )
    }

    fn denied(self) -> DomainError {
        match self {
            Self::EditComment | Self::DeleteComment => DomainError::NotCommentAuthor,
            _ => DomainError::NotReviewOwner,
        }
    }
}

/// Check whether `caller` may perform `action` on a resource owned by `owner`.
pub fn authorize(caller: Snowflake, owner: Snowflake, action: Action) -> Result<(), DomainError> {
    if !action.requires_ownership() || caller == owner {
        Ok(())
    } else {
        Err(action.denied())
    }
}
