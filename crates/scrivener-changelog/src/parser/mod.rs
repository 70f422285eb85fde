//! Turning raw commits into the entries of a release section

mod conventional;
mod types;

pub use conventional::ConventionalParser;
pub use types::*;

use crate::types::ParsedCommit;
use scrivener_git::CommitInfo;

/// Seam between commit history and the renderer.
///
/// The renderer parses every commit of a release block. Commits that fail to
/// parse are dropped. Breaking changes are always reported, while
/// `should_include` decides which of the remaining commits get a line in a
/// type section.
pub trait CommitParser: Send + Sync {
    /// Structured form of `commit`, or `None` when it does not follow the format
    fn parse(&self, commit: &CommitInfo) -> Option<ParsedCommit>;

    /// Whether `commit` is listed under its type section
    fn should_include(&self, commit: &ParsedCommit) -> bool;
}
