//! Domain entities - core business objects

mod comment;
mod reaction;
mod review;

pub use comment::{normalize_comment_text, Comment, MAX_COMMENT_LENGTH};
pub use reaction::{ReactionCounts, ReactionKind, ReactionLedger, ReactionToggle};
pub use review::{Cascade, NewReview, ReactionOutcome, Review, ReviewChanges, ReviewRecord};
