//! Value objects - immutable domain primitives

mod rating;
mod snowflake;

pub use rating::Rating;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError, REVIEWSTAR_EPOCH};
