//! Comment service
//!
//! Comments and their reactions live inside the review document, so every
//! write here is a versioned write of the whole review.

use review_core::{Comment, ReactionKind, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CommentResponse, CreateCommentRequest, ReactToCommentRequest, ReactionToggleResponse,
    UpdateCommentRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::review::{commit, load};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments of a review in posting order
    #[instrument(skip(self))]
    pub async fn list_comments(&self, review_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        let review = load(self.ctx, review_id).await?;
        Ok(review.comments().iter().map(CommentResponse::from).collect())
    }

    /// Append a comment by `author_id`
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        author_id: Snowflake,
        review_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let comment_id = self.ctx.generate_id();

        let (_, comment) = commit(self.ctx, review_id, |review| {
            review
                .add_comment(comment_id, author_id, &request.text)
                .map(Comment::clone)
        })
        .await?;

        info!(review_id = %review_id, comment_id = %comment_id, "Comment added");
        Ok(CommentResponse::from(&comment))
    }

    /// Replace a comment's text (author only)
    #[instrument(skip(self, request))]
    pub async fn edit_comment(
        &self,
        caller_id: Snowflake,
        review_id: Snowflake,
        comment_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let (_, comment) = commit(self.ctx, review_id, |review| {
            review
                .edit_comment(caller_id, comment_id, &request.text)
                .map(Comment::clone)
        })
        .await?;

        info!(review_id = %review_id, comment_id = %comment_id, "Comment edited");
        Ok(CommentResponse::from(&comment))
    }

    /// Remove a comment and its reactions (author only)
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        caller_id: Snowflake,
        review_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<()> {
        let (_, removed) = commit(self.ctx, review_id, |review| {
            review.remove_comment(caller_id, comment_id)
        })
        .await?;

        info!(
            review_id = %review_id,
            comment_id = %comment_id,
            reactions = removed.reactions.counts().total(),
            "Comment deleted"
        );
        Ok(())
    }

    /// Toggle the caller's reaction on a comment
    #[instrument(skip(self, request))]
    pub async fn react_to_comment(
        &self,
        caller_id: Snowflake,
        review_id: Snowflake,
        comment_id: Snowflake,
        request: ReactToCommentRequest,
    ) -> ServiceResult<ReactionToggleResponse> {
        let kind: ReactionKind = request.reaction.parse()?;

        let (_, outcome) = commit(self.ctx, review_id, |review| {
            review.react_to_comment(caller_id, comment_id, kind)
        })
        .await?;

        info!(
            review_id = %review_id,
            comment_id = %comment_id,
            reaction = kind.name(),
            added = outcome.toggle.is_added(),
            "Reaction toggled"
        );
        Ok(ReactionToggleResponse {
            comment_id: comment_id.to_string(),
            reaction: kind,
            added: outcome.toggle.is_added(),
            counts: outcome.counts.into(),
        })
    }
}
