//! Application services layer.

pub mod blog;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod homepage;
pub mod leaderboard;
pub mod media;
pub mod repos;
pub mod safe_query;
