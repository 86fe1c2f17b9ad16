mod repositories;

pub use repositories::{OwnerStats, RepoResult, ReviewQuery, ReviewRepository};
