//! Review aggregate <-> row mapper

use review_core::entities::{Comment, ReactionKind, ReactionLedger, Review, ReviewRecord};
use review_core::error::DomainError;
use review_core::value_objects::{Rating, Snowflake};
use tracing::warn;

use crate::models::{CommentDocument, ReviewModel};

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        let reactions = ReactionKind::ALL
            .into_iter()
            .map(|kind| {
                let users = comment.reactions.users(kind).iter().copied().collect();
                (kind.emoji().to_string(), users)
            })
            .collect();

        Self {
            id: comment.id,
            author_id: comment.author_id,
            text: comment.text.clone(),
            created_at: comment.created_at,
            edited: comment.is_edited(),
            edited_at: comment.edited_at,
            reactions,
        }
    }
}

impl From<CommentDocument> for Comment {
    fn from(doc: CommentDocument) -> Self {
        let comment_id = doc.id;
        let entries = doc
            .reactions
            .into_iter()
            .filter_map(|(label, users)| match label.parse::<ReactionKind>() {
                Ok(kind) => Some((kind, users)),
                Err(_) => {
                    warn!(comment_id = %comment_id, label = %label, "Dropping unknown reaction kind");
                    None
                }
            })
            .flat_map(|(kind, users)| users.into_iter().map(move |user| (kind, user)));
        let reactions = ReactionLedger::from_entries(entries);

        // Older documents may carry `edited: true` without a timestamp.
        let edited_at = match (doc.edited, doc.edited_at) {
            (_, Some(at)) => Some(at),
            (true, None) => Some(doc.created_at),
            (false, None) => None,
        };

        Comment {
            id: doc.id,
            author_id: doc.author_id,
            text: doc.text,
            created_at: doc.created_at,
            edited_at,
            reactions,
        }
    }
}

/// Convert ReviewModel to the Review aggregate
impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        let rating = Rating::new(model.rating).map_err(|_| {
            DomainError::InternalError(format!(
                "review {} has out-of-range rating {}",
                model.id, model.rating
            ))
        })?;

        Ok(Review::from(ReviewRecord {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            title: model.title,
            description: model.description,
            image: model.image,
            rating,
            category: model.category,
            comments: model.comments.0.into_iter().map(Comment::from).collect(),
            liked_by: model.liked_by.into_iter().map(Snowflake::new).collect(),
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }))
    }
}

/// Column values of a review, ready to bind
#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: f64,
    pub category: String,
    pub comments: Vec<CommentDocument>,
    pub liked_by: Vec<i64>,
    pub version: i64,
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id().into_inner(),
            user_id: review.owner_id().into_inner(),
            title: review.title().to_string(),
            description: review.description().to_string(),
            image: review.image().map(str::to_string),
            rating: review.rating().value(),
            category: review.category().to_string(),
            comments: review.comments().iter().map(CommentDocument::from).collect(),
            liked_by: review.liked_by().iter().map(|id| id.into_inner()).collect(),
            version: review.version(),
        }
    }
}
