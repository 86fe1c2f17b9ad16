//! Entity <-> model mappers

mod review;

pub use review::ReviewRow;
