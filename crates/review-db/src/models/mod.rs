//! Database models (row shapes)

mod review;

pub use review::{CommentDocument, ReviewModel};
