//! Integration test utilities for ReviewStar
//!
//! Spawns the real HTTP application on an ephemeral port and talks to it
//! over the network with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
