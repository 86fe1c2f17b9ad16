//! Business logic services
//!
//! Services borrow the shared `ServiceContext` and translate between DTOs
//! and the review aggregate.

pub mod comment;
pub mod context;
pub mod error;
pub mod profile;
pub mod review;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use profile::ProfileService;
pub use review::ReviewService;
