//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and paths.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::{Pagination, PaginationParams, ReviewFilter};
pub use path::{CommentPath, ReviewPath, UserPath};
pub use validated::ValidatedJson;
