//! Tag operations

use chrono::{TimeZone, Utc};
use semver::Version;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all tags that point (directly or through an annotated tag) at a commit
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::new(&name, commit.id().to_string()));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                let Ok(target) = tag.target().and_then(|t| t.peel_to_commit()) else {
                    return true;
                };
                let mut tag_info = TagInfo::new(&name, target.id().to_string());

                if let Some(msg) = tag.message() {
                    tag_info = tag_info.with_message(msg);
                }

                if let Some(tagger) = tag.tagger() {
                    if let Some(timestamp) = Utc.timestamp_opt(tagger.when().seconds(), 0).single()
                    {
                        tag_info = tag_info.with_timestamp(timestamp);
                    }
                }

                tags.push(tag_info);
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Tags named `<prefix><semver>`, highest version first
    #[instrument(skip(self))]
    pub fn semver_tags(&self, prefix: &str) -> Result<Vec<(TagInfo, Version)>> {
        let mut versioned: Vec<_> = self
            .tags()?
            .into_iter()
            .filter_map(|t| {
                let version = Version::parse(t.version_with_prefix(prefix)?).ok()?;
                Some((t, version))
            })
            .collect();

        versioned.sort_by(|a, b| b.1.cmp(&a.1));
        debug!(prefix, count = versioned.len(), "found semver tags");
        Ok(versioned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn setup_repo_with_tags(names: &[&str]) -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();

        std::fs::write(temp.path().join("file.txt"), "content").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let commit = repo.find_commit(oid).unwrap();
        for name in names {
            repo.tag_lightweight(name, commit.as_object(), false)
                .unwrap();
        }
        repo.tag("v0.9.0", commit.as_object(), &sig, "annotated", false)
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_list_tags_includes_annotated() {
        let (_temp, repo) = setup_repo_with_tags(&["v1.0.0"]);
        let tags = repo.tags().unwrap();
        assert_eq!(tags.len(), 2);

        let annotated = tags.iter().find(|t| t.name == "v0.9.0").unwrap();
        assert_eq!(annotated.message.as_deref(), Some("annotated"));
        assert!(annotated.timestamp.is_some());
    }

    #[test]
    fn test_semver_tags_sorted_and_prefixed() {
        let (_temp, repo) =
            setup_repo_with_tags(&["v1.0.0", "v1.10.0", "v1.2.0", "docs-v3.0.0", "nightly"]);
        let tags = repo.semver_tags("v").unwrap();
        let names: Vec<_> = tags.iter().map(|(t, _)| t.name.as_str()).collect();

        assert_eq!(names, vec!["v1.10.0", "v1.2.0", "v1.0.0", "v0.9.0"]);
    }
}
