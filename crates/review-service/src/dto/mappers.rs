//! Entity to DTO mappers

use review_core::{Comment, OwnerStats, ReactionCounts, ReactionKind, Review, Snowflake};

use super::responses::{CommentResponse, ProfileStatsResponse, ReactionCountsResponse, ReviewResponse};

impl From<ReactionCounts> for ReactionCountsResponse {
    fn from(counts: ReactionCounts) -> Self {
        Self {
            like: counts.like,
            love: counts.love,
            laugh: counts.laugh,
        }
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        let reactions = ReactionKind::ALL
            .into_iter()
            .map(|kind| {
                let users = comment
                    .reactions
                    .users(kind)
                    .iter()
                    .map(Snowflake::to_string)
                    .collect();
                (kind, users)
            })
            .collect();

        Self {
            id: comment.id.to_string(),
            author_id: comment.author_id.to_string(),
            text: comment.text.clone(),
            created_at: comment.created_at,
            edited: comment.is_edited(),
            edited_at: comment.edited_at,
            reactions,
            reaction_counts: comment.reactions.counts().into(),
        }
    }
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id().to_string(),
            user_id: review.owner_id().to_string(),
            title: review.title().to_string(),
            description: review.description().to_string(),
            image: review.image().map(str::to_string),
            rating: review.rating().value(),
            category: review.category().to_string(),
            comments: review.comments().iter().map(CommentResponse::from).collect(),
            liked_by: review.liked_by().iter().map(Snowflake::to_string).collect(),
            like_count: review.like_count(),
            version: review.version(),
            created_at: review.created_at(),
            updated_at: review.updated_at(),
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

impl ProfileStatsResponse {
    pub fn new(user_id: Snowflake, stats: OwnerStats) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_reviews: stats.total_reviews,
            total_likes: stats.total_likes,
            total_comments: stats.total_comments,
        }
    }
}
