//! Commit history operations

use std::collections::HashMap;
use std::path::Path;

use chrono::{TimeZone, Utc};
use git2::{DiffOptions, Oid, Sort};
use tracing::{debug, instrument};

use scrivener_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{CommitInfo, CommitRange};

impl GitRepo {
    /// Read the commits of `range`, newest first.
    ///
    /// Each returned commit carries the names of the tags pointing at it.
    /// A branch without commits yields an empty list.
    #[instrument(skip(self), fields(from = ?range.from, path = ?range.path))]
    pub fn commits_in_range(&self, range: &CommitRange) -> Result<Vec<CommitInfo>> {
        let Some(head) = self.head_commit()? else {
            debug!("branch has no commits yet");
            return Ok(Vec::new());
        };

        let tag_index = self.tag_index()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        if let Some(from) = &range.from {
            revwalk.hide(self.resolve_commit(from)?)?;
        }

        let mut commits = Vec::new();
        let mut skipped_merges = 0usize;

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;

            if !range.include_merges && commit.parent_count() > 1 {
                skipped_merges += 1;
                continue;
            }

            if let Some(path) = &range.path {
                if !self.touches_path(&commit, path)? {
                    continue;
                }
            }

            let mut info = commit_to_info(&commit);
            if let Some(tags) = tag_index.get(&oid) {
                info.tags = tags.clone();
            }
            commits.push(info);
        }

        debug!(count = commits.len(), skipped_merges, "read commit range");
        Ok(commits)
    }

    /// Resolve a revision (tag, branch, hash) to the commit it names
    fn resolve_commit(&self, revision: &str) -> Result<Oid> {
        let object = self
            .repo
            .revparse_single(revision)
            .map_err(|_| GitError::RevisionNotFound(revision.to_string()))?;
        Ok(object.peel_to_commit()?.id())
    }

    /// Whether `commit` changes anything under `path` compared to its first parent
    fn touches_path(&self, commit: &git2::Commit<'_>, path: &Path) -> Result<bool> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.pathspec(path);

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        Ok(diff.deltas().len() > 0)
    }

    /// Map of commit id to the names of the tags pointing at it
    fn tag_index(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut index: HashMap<Oid, Vec<String>> = HashMap::new();
        for tag in self.tags()? {
            let oid = Oid::from_str(&tag.commit_hash)?;
            index.entry(oid).or_default().push(tag.name);
        }
        Ok(index)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let message = commit.summary().unwrap_or("(no message)").to_string();

    let body = commit.body().map(|b| b.to_string());

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(
        hash,
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
    .with_body(body.unwrap_or_default())
    .with_parent_count(commit.parent_count())
}
