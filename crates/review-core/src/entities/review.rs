//! Review aggregate - a review plus its comments, reactions and likes
//!
//! Every mutation goes through the aggregate so ownership and ordering
//! rules hold no matter which storage backend persists it. Persisting is
//! the repository's job: it writes the whole aggregate with a version check.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use validator::ValidateUrl;

use super::comment::Comment;
use super::reaction::{ReactionCounts, ReactionKind, ReactionToggle};
use crate::access::{authorize, Action};
use crate::error::DomainError;
use crate::value_objects::{Rating, Snowflake};

/// Fields supplied when a review is first posted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub title: String,
    pub description: String,
    pub rating: f64,
    pub category: String,
    pub image: Option<String>,
}

/// Partial update of the owner-editable fields. `None` leaves a field alone.
///
/// An empty `image` removes the picture; the text fields must stay non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.rating.is_none()
            && self.category.is_none()
            && self.image.is_none()
    }
}

/// Outcome of a reaction toggle, with the comment's counts afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub kind: ReactionKind,
    pub toggle: ReactionToggle,
    pub counts: ReactionCounts,
}

/// What a review deletion takes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub comments: usize,
    pub reactions: usize,
    pub likes: usize,
}

/// Every stored field of a review, used to rebuild the aggregate from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: Rating,
    pub category: String,
    pub comments: Vec<Comment>,
    pub liked_by: BTreeSet<Snowflake>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The review aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    id: Snowflake,
    user_id: Snowflake,
    title: String,
    description: String,
    image: Option<String>,
    rating: Rating,
    category: String,
    comments: Vec<Comment>,
    liked_by: BTreeSet<Snowflake>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DomainError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// A blank image means "no image"; anything else must be a URL.
fn optional_image(value: Option<&str>) -> Result<Option<String>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) if url.validate_url() => Ok(Some(url.to_string())),
        Some(other) => Err(DomainError::InvalidImageUrl(other.to_string())),
    }
}

impl Review {
    /// Validate `fields` and build a fresh review at version 0.
    pub fn create(id: Snowflake, owner: Snowflake, fields: NewReview) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: owner,
            title: required("title", &fields.title)?,
            description: required("description", &fields.description)?,
            image: optional_image(fields.image.as_deref())?,
            rating: Rating::new(fields.rating)?,
            category: required("category", &fields.category)?,
            comments: Vec::new(),
            liked_by: BTreeSet::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn owner_id(&self) -> Snowflake {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Comments in the order they were posted.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, comment_id: Snowflake) -> Result<&Comment, DomainError> {
        self.comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or(DomainError::CommentNotFound(comment_id))
    }

    pub fn liked_by(&self) -> &BTreeSet<Snowflake> {
        &self.liked_by
    }

    /// Always the size of `liked_by`; there is no separate counter.
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, user_id: Snowflake) -> bool {
        self.liked_by.contains(&user_id)
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Append a comment from any authenticated user.
    pub fn add_comment(
        &mut self,
        comment_id: Snowflake,
        author: Snowflake,
        text: &str,
    ) -> Result<&Comment, DomainError> {
        authorize(author, self.user_id, Action::AddComment)?;
        let comment = Comment::new(comment_id, author, text)?;
        self.comments.push(comment);
        self.touch();
        Ok(&self.comments[self.comments.len() - 1])
    }

    /// Remove a comment, discarding its reactions. Author only.
    pub fn remove_comment(
        &mut self,
        requester: Snowflake,
        comment_id: Snowflake,
    ) -> Result<Comment, DomainError> {
        let index = self.position(comment_id)?;
        authorize(requester, self.comments[index].author_id, Action::DeleteComment)?;
        let removed = self.comments.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Edit a comment in place; its position never changes.
    pub fn edit_comment(
        &mut self,
        requester: Snowflake,
        comment_id: Snowflake,
        text: &str,
    ) -> Result<&Comment, DomainError> {
        let index = self.position(comment_id)?;
        self.comments[index].edit(requester, text)?;
        self.touch();
        Ok(&self.comments[index])
    }

    pub fn react_to_comment(
        &mut self,
        requester: Snowflake,
        comment_id: Snowflake,
        kind: ReactionKind,
    ) -> Result<ReactionOutcome, DomainError> {
        let index = self.position(comment_id)?;
        authorize(requester, self.comments[index].author_id, Action::ReactToComment)?;
        let comment = &mut self.comments[index];
        let toggle = comment.react(requester, kind);
        let counts = comment.reactions.counts();
        self.touch();
        Ok(ReactionOutcome {
            kind,
            toggle,
            counts,
        })
    }

    // =========================================================================
    // Review-level operations
    // =========================================================================

    /// Flip `requester`'s like. Returns whether the review is now liked.
    pub fn toggle_like(&mut self, requester: Snowflake) -> Result<bool, DomainError> {
        authorize(requester, self.user_id, Action::LikeReview)?;
        let liked = if self.liked_by.remove(&requester) {
            false
        } else {
            self.liked_by.insert(requester);
            true
        };
        self.touch();
        Ok(liked)
    }

    /// Apply a partial update. Owner only; nothing changes unless every
    /// supplied field is valid.
    pub fn update(&mut self, requester: Snowflake, changes: ReviewChanges) -> Result<(), DomainError> {
        authorize(requester, self.user_id, Action::UpdateReview)?;

        let title = changes.title.as_deref().map(|v| required("title", v)).transpose()?;
        let description = changes
            .description
            .as_deref()
            .map(|v| required("description", v))
            .transpose()?;
        let category = changes
            .category
            .as_deref()
            .map(|v| required("category", v))
            .transpose()?;
        let rating = changes.rating.map(Rating::new).transpose()?;
        let image = changes
            .image
            .as_deref()
            .map(|v| optional_image(Some(v)))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        if let Some(image) = image {
            self.image = image;
        }
        self.touch();
        Ok(())
    }

    /// Authorize deleting this review. Removing the stored document is left
    /// to the repository; everything nested goes with it.
    pub fn delete(&self, requester: Snowflake) -> Result<Cascade, DomainError> {
        authorize(requester, self.user_id, Action::DeleteReview)?;
        Ok(Cascade {
            comments: self.comments.len(),
            reactions: self
                .comments
                .iter()
                .map(|c| c.reactions.counts().total())
                .sum(),
            likes: self.liked_by.len(),
        })
    }

    /// Bump the version for a pending write, returning the version the
    /// stored copy must still have for the write to succeed.
    pub fn stage_write(&mut self) -> i64 {
        let expected = self.version;
        self.version += 1;
        expected
    }

    fn position(&self, comment_id: Snowflake) -> Result<usize, DomainError> {
        self.comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(DomainError::CommentNotFound(comment_id))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            description: record.description,
            image: record.image,
            rating: record.rating,
            category: record.category,
            comments: record.comments,
            liked_by: record.liked_by,
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<Review> for ReviewRecord {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            title: review.title,
            description: review.description,
            image: review.image,
            rating: review.rating,
            category: review.category,
            comments: review.comments,
            liked_by: review.liked_by,
            version: review.version,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}
