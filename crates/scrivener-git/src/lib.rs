//! Scrivener Git - Git operations for changelog synthesis
//!
//! This crate reads commit history and tags: the raw material the
//! changelog renderer works from.

mod commits;
mod repository;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, CommitRange, TagInfo};
