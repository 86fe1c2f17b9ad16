//! Repository implementations

pub mod error;
mod memory;
mod review;

pub use memory::InMemoryReviewRepository;
pub use review::PgReviewRepository;
