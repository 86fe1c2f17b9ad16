//! # review-core
//!
//! Domain layer for ReviewStar: the review aggregate with its comments,
//! reaction ledgers and likes, the ownership predicate, and the repository
//! port. No infrastructure dependencies.

pub mod access;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use access::{authorize, Action};
pub use entities::{
    normalize_comment_text, Cascade, Comment, NewReview, ReactionCounts, ReactionKind,
    ReactionLedger, ReactionOutcome, ReactionToggle, Review, ReviewChanges, ReviewRecord,
    MAX_COMMENT_LENGTH,
};
pub use error::DomainError;
pub use traits::{OwnerStats, RepoResult, ReviewQuery, ReviewRepository};
pub use value_objects::{Rating, Snowflake, SnowflakeGenerator, SnowflakeParseError};
