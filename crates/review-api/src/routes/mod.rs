//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes sit at the root.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{comments, health, profile, reviews};
use crate::state::AppState;

/// Create the main router: API v1 plus health probes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(review_routes())
        .merge(comment_routes())
        .merge(user_routes())
}

/// Review routes
fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route("/reviews/mine", get(reviews::list_my_reviews))
        .route(
            "/reviews/:review_id",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/:review_id/like", put(reviews::toggle_like))
}

/// Comment and reaction routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews/:review_id/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/reviews/:review_id/comments/:comment_id",
            patch(comments::edit_comment).delete(comments::delete_comment),
        )
        .route(
            "/reviews/:review_id/comments/:comment_id/reactions",
            post(comments::react_to_comment),
        )
}

/// User profile routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me/stats", get(profile::get_my_stats))
        .route("/users/:user_id/stats", get(profile::get_user_stats))
}
