//! History access used by the pipeline

use scrivener_core::error::Result;
use scrivener_git::{CommitInfo, CommitRange, GitRepo, TagInfo};
use semver::Version;
use tracing::debug;

use crate::gate::VersionGate;

/// Source of commits and version tags
pub trait CommitSource {
    /// Commits of `range`, newest first, each carrying its tag names
    fn commits(&self, range: &CommitRange) -> Result<Vec<CommitInfo>>;

    /// Tags named `<prefix><semver>`, highest version first
    fn semver_tags(&self, prefix: &str) -> Result<Vec<(TagInfo, Version)>>;
}

impl CommitSource for GitRepo {
    fn commits(&self, range: &CommitRange) -> Result<Vec<CommitInfo>> {
        Ok(self.commits_in_range(range)?)
    }

    fn semver_tags(&self, prefix: &str) -> Result<Vec<(TagInfo, Version)>> {
        Ok(GitRepo::semver_tags(self, prefix)?)
    }
}

/// Highest version tag the gate would emit a release for
pub fn last_eligible_tag(
    source: &dyn CommitSource,
    prefix: &str,
    gate: &VersionGate,
) -> Result<Option<(TagInfo, Version)>> {
    let found = source
        .semver_tags(prefix)?
        .into_iter()
        .find(|(_, version)| gate.decide(Some(&version.to_string())).is_emit());

    debug!(
        prefix,
        tag = found.as_ref().map(|(t, _)| t.name.as_str()),
        "last eligible tag"
    );
    Ok(found)
}
