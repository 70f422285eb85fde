//! Git types

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Commit message (first line)
    pub message: String,
    /// Commit body after the summary line
    pub body: Option<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Number of parents (more than one for merge commits)
    pub parent_count: usize,
    /// Names of the tags pointing at this commit
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            body: None,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
            parent_count: 1,
            tags: Vec::new(),
        }
    }

    /// Set the commit body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        self
    }

    /// Attach a tag name
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the parent count
    pub fn with_parent_count(mut self, parent_count: usize) -> Self {
        self.parent_count = parent_count;
        self
    }

    /// Whether this is a merge commit
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }

    /// Version named by this commit's tags, with `prefix` removed.
    ///
    /// A tag whose remainder is a semantic version wins over other prefixed
    /// tags, so `v1.0.0` is chosen over `v-stable` on the same commit. When
    /// no remainder parses, the first prefixed tag is returned.
    pub fn tagged_version(&self, prefix: &str) -> Option<&str> {
        let tag = self.version_tag(prefix)?;
        tag.strip_prefix(prefix)
    }

    /// Full name of the tag [`tagged_version`](Self::tagged_version) reads
    pub fn version_tag(&self, prefix: &str) -> Option<&str> {
        let mut prefixed = self.tags.iter().filter(|t| t.starts_with(prefix));
        let first = prefixed.clone().next()?;
        let versioned = prefixed.find(|t| is_semver(&t[prefix.len()..]));
        Some(versioned.unwrap_or(first).as_str())
    }

    /// Get the full message including body
    pub fn full_message(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n\n{}", self.message, body),
            None => self.message.clone(),
        }
    }
}

/// Whether `raw` is a semantic version, allowing one leading `v`
fn is_semver(raw: &str) -> bool {
    let raw = raw.trim();
    Version::parse(raw.strip_prefix('v').unwrap_or(raw)).is_ok()
}

/// Information about a git tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Tag timestamp (for annotated tags)
    pub timestamp: Option<DateTime<Utc>>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
            message: None,
            timestamp: None,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Version part of the tag name once `prefix` is removed
    pub fn version_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.name.strip_prefix(prefix)
    }
}

/// Which commits to read from history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRange {
    /// Exclusive starting revision; `None` walks back to the root commit
    pub from: Option<String>,
    /// Only keep commits touching this path (relative to the repository root)
    pub path: Option<PathBuf>,
    /// Keep merge commits
    pub include_merges: bool,
}

impl CommitRange {
    /// Range over the whole history reachable from HEAD, merges excluded
    pub fn all() -> Self {
        Self::default()
    }

    /// Range of commits after `from`
    pub fn since(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            ..Self::default()
        }
    }

    /// Restrict the range to commits touching `path`
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set whether merge commits are kept
    pub fn with_merges(mut self, include: bool) -> Self {
        self.include_merges = include;
        self
    }
}
