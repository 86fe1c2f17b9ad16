//! # review-service
//!
//! Application layer: each use case loads a review aggregate, applies one
//! domain operation, and writes it back under a version check.

pub mod dto;
pub mod services;

pub use services::{
    CommentService, ProfileService, ReviewService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
