//! API Integration Tests
//!
//! Each test spawns the full HTTP application with the in-memory storage
//! backend, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

const OWNER: i64 = 1001;
const ALICE: i64 = 1002;
const BOB: i64 = 1003;

async fn create_review(server: &TestServer, owner: i64) -> ReviewBody {
    let response = server
        .post_as("/api/v1/reviews", owner, &CreateReviewRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn add_comment(server: &TestServer, review_id: &str, author: i64, text: &str) -> CommentBody {
    let response = server
        .post_as(
            &format!("/api/v1/reviews/{review_id}/comments"),
            author,
            &CommentRequest::new(text),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn react(server: &TestServer, review_id: &str, comment_id: &str, user: i64, reaction: &str) -> ReactionBody {
    let response = server
        .post_as(
            &format!("/api/v1/reviews/{review_id}/comments/{comment_id}/reactions"),
            user,
            &ReactRequest::new(reaction),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn fetch_review(server: &TestServer, review_id: &str) -> ReviewBody {
    let response = server.get(&format!("/api/v1/reviews/{review_id}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_mutation_without_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/reviews", &CreateReviewRequest::unique())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let foreign = review_common::JwtService::new("some-other-secret", 900)
        .issue_access_token(review_core::Snowflake(OWNER))
        .unwrap();

    let response = server
        .client
        .post(format!("{}/api/v1/reviews", server.base_url()))
        .bearer_auth(foreign)
        .json(&CreateReviewRequest::unique())
        .send()
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_review() {
    let server = TestServer::start().await.unwrap();
    let created = create_review(&server, OWNER).await;

    assert_eq!(created.user_id, OWNER.to_string());
    assert_eq!(created.like_count, 0);
    assert!(created.comments.is_empty());
    assert_eq!(created.version, 0);

    let fetched = fetch_review(&server, &created.id).await;
    assert_eq!(fetched.title, created.title);
    assert_eq!(fetched.category, "Films");
}

#[tokio::test]
async fn test_create_review_rejects_bad_rating() {
    let server = TestServer::start().await.unwrap();
    let mut request = CreateReviewRequest::unique();
    request.rating = 7.5;

    let response = server.post_as("/api/v1/reviews", OWNER, &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_unknown_review() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/reviews/123456").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_REVIEW");
}

// Scenario D: only the owner may update a review.
#[tokio::test]
async fn test_non_owner_cannot_update() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    let path = format!("/api/v1/reviews/{}", review.id);

    let response = server
        .patch_as(&path, BOB, &json!({ "title": "hack" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_REVIEW_OWNER");

    assert_eq!(fetch_review(&server, &review.id).await.title, review.title);

    let response = server
        .patch_as(&path, OWNER, &json!({ "title": "Better title", "rating": 2.5 }))
        .await
        .unwrap();
    let updated: ReviewBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Better title");
    assert!((updated.rating - 2.5).abs() < f64::EPSILON);
    assert_eq!(updated.description, review.description);
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;

    let response = server
        .patch_as(&format!("/api/v1/reviews/{}", review.id), OWNER, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// Scenario B: like toggles on and off.
#[tokio::test]
async fn test_like_toggle() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    let path = format!("/api/v1/reviews/{}/like", review.id);

    let liked: LikeBody = assert_json(server.put_as(&path, ALICE).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(liked.liked);
    assert_eq!(liked.like_count, 1);
    assert_eq!(
        fetch_review(&server, &review.id).await.liked_by,
        vec![ALICE.to_string()]
    );

    let unliked: LikeBody = assert_json(server.put_as(&path, ALICE).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, 0);

    // Owners may like their own review.
    let own: LikeBody = assert_json(server.put_as(&path, OWNER).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(own.liked);
    assert_eq!(own.review_id, review.id);
}

#[tokio::test]
async fn test_list_reviews_newest_first_with_category_filter() {
    let server = TestServer::start().await.unwrap();
    let mut film_ids = Vec::new();
    for _ in 0..3 {
        film_ids.push(create_review(&server, OWNER).await.id);
    }
    let response = server
        .post_as(
            "/api/v1/reviews",
            ALICE,
            &CreateReviewRequest::in_category("Books"),
        )
        .await
        .unwrap();
    let book: ReviewBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let page: PageBody<ReviewBody> = assert_json(
        server.get("/api/v1/reviews?limit=2").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].id, book.id);
    assert_eq!(page.data[1].id, film_ids[2]);
    assert!(page.pagination.has_more);

    let before = page.pagination.before.unwrap();
    let next: PageBody<ReviewBody> = assert_json(
        server
            .get(&format!("/api/v1/reviews?limit=2&before={before}"))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let ids: Vec<_> = next.data.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![film_ids[1].clone(), film_ids[0].clone()]);

    let books: PageBody<ReviewBody> = assert_json(
        server.get("/api/v1/reviews?category=Books").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(books.data.len(), 1);
    assert_eq!(books.data[0].category, "Books");
    assert!(!books.pagination.has_more);

    let mine: Vec<ReviewBody> = assert_json(
        server.get_as("/api/v1/reviews/mine", OWNER).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(mine.len(), 3);
    assert!(mine.iter().all(|r| r.user_id == OWNER.to_string()));
}

#[tokio::test]
async fn test_malformed_cursor_is_bad_request() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/reviews?before=soon").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");

    let response = server
        .get("/api/v1/reviews?before=900&after=100")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Comment Tests
// ============================================================================

// Scenario A: reactions are mutually exclusive per user.
#[tokio::test]
async fn test_reaction_switching() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    let comment = add_comment(&server, &review.id, ALICE, "Great review!").await;
    assert!(!comment.edited);
    assert_eq!(comment.author_id, ALICE.to_string());

    let loved = react(&server, &review.id, &comment.id, BOB, "❤️").await;
    assert!(loved.added);
    assert_eq!(loved.reaction, "❤️");
    assert_eq!(loved.counts, CountsBody { like: 0, love: 1, laugh: 0 });

    let laughed = react(&server, &review.id, &comment.id, BOB, "laugh").await;
    assert!(laughed.added);
    assert_eq!(laughed.reaction, "😂");
    assert_eq!(laughed.counts, CountsBody { like: 0, love: 0, laugh: 1 });

    let stored = fetch_review(&server, &review.id).await;
    let reactions = &stored.comments[0].reactions;
    assert!(reactions["❤️"].is_empty());
    assert_eq!(reactions["😂"], vec![BOB.to_string()]);

    // Toggling the same kind again removes it.
    let removed = react(&server, &review.id, &comment.id, BOB, "😂").await;
    assert!(!removed.added);
    assert_eq!(removed.counts, CountsBody { like: 0, love: 0, laugh: 0 });
}

#[tokio::test]
async fn test_unknown_reaction_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    let comment = add_comment(&server, &review.id, ALICE, "hello").await;

    let response = server
        .post_as(
            &format!("/api/v1/reviews/{}/comments/{}/reactions", review.id, comment.id),
            BOB,
            &ReactRequest::new("🔥"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_REACTION");
}

// Scenario C: comment text validation.
#[tokio::test]
async fn test_comment_text_validation() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    let path = format!("/api/v1/reviews/{}/comments", review.id);

    let empty = server.post_as(&path, ALICE, &CommentRequest::new("")).await.unwrap();
    assert_status(empty, StatusCode::BAD_REQUEST).await.unwrap();

    let long = server
        .post_as(&path, ALICE, &CommentRequest::new(&"x".repeat(501)))
        .await
        .unwrap();
    let code = assert_error(long, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "COMMENT_TOO_LONG");

    let ok = add_comment(&server, &review.id, ALICE, "ok").await;
    assert!(!ok.edited);

    // Exactly 500 characters is still allowed.
    add_comment(&server, &review.id, ALICE, &"é".repeat(500)).await;
}

#[tokio::test]
async fn test_comment_alias_field() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;

    let response = server
        .post_as(
            &format!("/api/v1/reviews/{}/comments", review.id),
            ALICE,
            &json!({ "comment": "via alias" }),
        )
        .await
        .unwrap();
    let comment: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.text, "via alias");
}

#[tokio::test]
async fn test_only_author_edits_and_deletes_comment() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    let comment = add_comment(&server, &review.id, ALICE, "first take").await;
    react(&server, &review.id, &comment.id, BOB, "👍").await;
    let path = format!("/api/v1/reviews/{}/comments/{}", review.id, comment.id);

    let response = server
        .patch_as(&path, OWNER, &CommentRequest::new("rewritten"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_COMMENT_AUTHOR");

    let response = server
        .patch_as(&path, ALICE, &CommentRequest::new("second take"))
        .await
        .unwrap();
    let edited: CommentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.text, "second take");
    assert!(edited.edited);
    assert!(edited.edited_at.is_some());
    assert_eq!(edited.reaction_counts.like, 1);

    let response = server.delete_as(&path, BOB).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_as(&path, ALICE).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .patch_as(&path, ALICE, &CommentRequest::new("third take"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_comments_listed_in_posting_order() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    for (author, text) in [(ALICE, "one"), (BOB, "two"), (ALICE, "three")] {
        add_comment(&server, &review.id, author, text).await;
    }

    let comments: Vec<CommentBody> = assert_json(
        server
            .get(&format!("/api/v1/reviews/{}/comments", review.id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_delete_review_cascades() {
    let server = TestServer::start().await.unwrap();
    let review = create_review(&server, OWNER).await;
    let comment = add_comment(&server, &review.id, ALICE, "doomed").await;
    react(&server, &review.id, &comment.id, BOB, "😂").await;
    let path = format!("/api/v1/reviews/{}", review.id);

    let response = server.delete_as(&path, ALICE).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_as(&path, OWNER).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_as(
            &format!("{path}/comments/{}/reactions", comment.id),
            BOB,
            &ReactRequest::new("👍"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_REVIEW");
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_stats() {
    let server = TestServer::start().await.unwrap();
    let first = create_review(&server, OWNER).await;
    let second = create_review(&server, OWNER).await;
    server
        .put_as(&format!("/api/v1/reviews/{}/like", first.id), ALICE)
        .await
        .unwrap();
    server
        .put_as(&format!("/api/v1/reviews/{}/like", second.id), BOB)
        .await
        .unwrap();
    add_comment(&server, &second.id, ALICE, "nice").await;

    let stats: StatsBody = assert_json(
        server.get(&format!("/api/v1/users/{OWNER}/stats")).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(stats.user_id, OWNER.to_string());
    assert_eq!(
        (stats.total_reviews, stats.total_likes, stats.total_comments),
        (2, 2, 1)
    );

    let mine: StatsBody = assert_json(
        server.get_as("/api/v1/users/@me/stats", ALICE).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(mine.total_reviews, 0);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

// Racing requests on one review conflict at the storage layer and are
// retried by the HTTP layer, so every toggle lands exactly once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_are_not_lost() {
    let config = test_config(&[("WRITE_CONFLICT_RETRIES", "50")]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();
    let review = create_review(&server, OWNER).await;
    let path = format!("/api/v1/reviews/{}/like", review.id);

    let requests = (0..16).map(|i| server.put_as(&path, 5000 + i));
    for response in join_all(requests).await {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let stored = fetch_review(&server, &review.id).await;
    assert_eq!(stored.like_count, 16);
    assert_eq!(stored.liked_by.len(), 16);
    assert_eq!(stored.version, 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reactions_keep_exclusivity() {
    let config = test_config(&[("WRITE_CONFLICT_RETRIES", "50")]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();
    let review = create_review(&server, OWNER).await;
    let comment = add_comment(&server, &review.id, ALICE, "contested").await;
    let path = format!("/api/v1/reviews/{}/comments/{}/reactions", review.id, comment.id);

    // Each user sends a distinct kind; whichever lands last wins.
    let kinds = ["👍", "❤️", "😂"];
    let requests = (0..12).map(|i| {
        let body = ReactRequest::new(kinds[i % 3]);
        let path = path.clone();
        let server = &server;
        async move { server.post_as(&path, 6000 + (i as i64 % 4), &body).await }
    });
    for response in join_all(requests).await {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let stored = fetch_review(&server, &review.id).await;
    let reactions = &stored.comments[0].reactions;
    let mut seen = std::collections::HashSet::new();
    for users in reactions.values() {
        for user in users {
            assert!(seen.insert(user.clone()), "user {user} holds two reactions");
        }
    }
    let counts = &stored.comments[0].reaction_counts;
    assert_eq!(counts.like + counts.love + counts.laugh, seen.len());
}
