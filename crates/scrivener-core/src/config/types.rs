//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration for Scrivener
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Hooks configuration
    pub hooks: HooksConfig,
}

/// Default header written above the newest release section
pub const DEFAULT_HEADER: &str = "# Changelog\n\nAll notable changes to this project will be documented in this file.\n";

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Whether to generate the changelog at all
    pub enabled: bool,

    /// Changelog file path
    pub file: PathBuf,

    /// Header text that replaces any preamble above the first release
    pub header: String,

    /// Rendering preset name
    pub preset: String,

    /// Prefix stripped from tag names to obtain versions
    pub tag_prefix: String,

    /// Treat bare numeric pre-releases as non-releases
    pub skip_unstable: bool,

    /// Only consider commits touching this path
    pub path: Option<PathBuf>,

    /// Explicit starting revision for the commit range
    pub from: Option<String>,

    /// Repository URL used for compare and commit links
    pub repo_url: Option<String>,

    /// Commit types to include
    pub types: HashMap<String, CommitTypeConfig>,

    /// Whether to include commit hashes
    pub include_hashes: bool,

    /// Whether to include authors
    pub include_authors: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        let mut types = HashMap::new();
        for (name, section, hidden) in [
            ("feat", "Features", false),
            ("fix", "Bug Fixes", false),
            ("perf", "Performance Improvements", false),
            ("revert", "Reverts", false),
            ("docs", "Documentation", true),
            ("refactor", "Code Refactoring", true),
            ("test", "Tests", true),
            ("build", "Build System", true),
            ("ci", "Continuous Integration", true),
            ("chore", "Chores", true),
        ] {
            types.insert(
                name.to_string(),
                CommitTypeConfig {
                    section: section.to_string(),
                    hidden,
                },
            );
        }

        Self {
            enabled: true,
            file: PathBuf::from("CHANGELOG.md"),
            header: DEFAULT_HEADER.to_string(),
            preset: "conventional".to_string(),
            tag_prefix: "v".to_string(),
            skip_unstable: false,
            path: None,
            from: None,
            repo_url: None,
            types,
            include_hashes: true,
            include_authors: false,
        }
    }
}

/// Configuration for a commit type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitTypeConfig {
    /// Section header in changelog
    pub section: String,
    /// Whether to hide this type from changelog
    #[serde(default)]
    pub hidden: bool,
}

/// Hooks configuration
///
/// Each lifecycle point runs at most one shell command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Command to run before the changelog is synthesized
    pub pre_changelog: Option<String>,

    /// Command to run after the changelog is written
    pub post_changelog: Option<String>,
}
