//! Markdown changelog formatter

use scrivener_core::config::ChangelogConfig;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{ChangelogEntry, ParsedCommit};

/// Heading and bullet conventions of a markdown preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownStyle {
    /// `## [1.2.0](compare) (2024-05-01)` with `*` bullets
    Conventional,
    /// `## [1.2.0] - 2024-05-01` with `-` bullets
    KeepAChangelog,
}

impl MarkdownStyle {
    /// Preset name
    pub fn name(&self) -> &'static str {
        match self {
            MarkdownStyle::Conventional => "conventional",
            MarkdownStyle::KeepAChangelog => "keepachangelog",
        }
    }

    fn bullet(&self) -> &'static str {
        match self {
            MarkdownStyle::Conventional => "*",
            MarkdownStyle::KeepAChangelog => "-",
        }
    }
}

/// Markdown changelog formatter
pub struct MarkdownFormatter {
    style: MarkdownStyle,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new(style: MarkdownStyle) -> Self {
        Self { style }
    }

    /// Formatter style
    pub fn style(&self) -> MarkdownStyle {
        self.style
    }

    fn heading(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> String {
        let date = entry.date.format("%Y-%m-%d");

        match self.style {
            MarkdownStyle::Conventional => {
                let compare = match (&config.repo_url, &entry.previous_tag) {
                    (Some(url), Some(previous)) => Some(format!(
                        "{}/compare/{}...{}",
                        url.trim_end_matches('/'),
                        previous,
                        entry.tag.as_deref().unwrap_or("HEAD")
                    )),
                    _ => None,
                };

                match compare {
                    Some(link) => format!("## [{}]({}) ({})\n\n", entry.version, link, date),
                    None => format!("## [{}] ({})\n\n", entry.version, date),
                }
            }
            MarkdownStyle::KeepAChangelog => format!("## [{}] - {}\n\n", entry.version, date),
        }
    }

    fn item(&self, commit: &ParsedCommit, text: &str, config: &ChangelogConfig) -> String {
        let mut line = format!("{} ", self.style.bullet());

        if let Some(scope) = &commit.scope {
            line.push_str(&format!("**{}:** ", scope));
        }
        line.push_str(text);

        if config.include_hashes {
            let short_hash = commit.short_hash();
            match &config.repo_url {
                Some(url) => line.push_str(&format!(
                    " ([{}]({}/commit/{}))",
                    short_hash,
                    url.trim_end_matches('/'),
                    commit.hash
                )),
                None => line.push_str(&format!(" ({})", short_hash)),
            }
        }

        if config.include_authors {
            line.push_str(&format!(" - {}", commit.author));
        }

        line.push('\n');
        line
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, entry, config), fields(style = self.style.name(), version = %entry.version, section_count = entry.sections.len()))]
    fn format(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> String {
        let mut output = self.heading(entry, config);

        if !entry.breaking_changes.is_empty() {
            output.push_str("### ⚠ BREAKING CHANGES\n\n");
            for commit in &entry.breaking_changes {
                output.push_str(&self.item(commit, commit.breaking_note(), config));
            }
            output.push('\n');
        }

        for section in &entry.sections {
            if section.is_empty() {
                continue;
            }

            output.push_str(&format!("### {}\n\n", section.title));
            for commit in &section.commits {
                output.push_str(&self.item(commit, &commit.description, config));
            }
            output.push('\n');
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn name(&self) -> &'static str {
        self.style.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Footer, Section};
    use chrono::{NaiveDate, Utc};

    fn commit(hash: &str, scope: Option<&str>, description: &str) -> ParsedCommit {
        ParsedCommit {
            hash: hash.to_string(),
            commit_type: "feat".to_string(),
            scope: scope.map(String::from),
            breaking: false,
            description: description.to_string(),
            body: None,
            footers: vec![],
            author: "Test".to_string(),
            timestamp: Utc::now(),
        }
    }

    fn entry(version: &str) -> ChangelogEntry {
        ChangelogEntry::new(version).with_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn test_conventional_basic() {
        let formatter = MarkdownFormatter::new(MarkdownStyle::Conventional);
        let config = ChangelogConfig::default();

        let mut entry = entry("1.0.0");
        let mut section = Section::new("Features");
        section.add_commit(commit("abc1234567890", None, "add new feature"));
        entry.add_section(section);

        let output = formatter.format(&entry, &config);
        assert_eq!(
            output,
            "## [1.0.0] (2024-05-01)\n\n### Features\n\n* add new feature (abc1234)\n\n"
        );
    }

    #[test]
    fn test_keepachangelog_heading_and_scope() {
        let formatter = MarkdownFormatter::new(MarkdownStyle::KeepAChangelog);
        let config = ChangelogConfig {
            include_hashes: false,
            ..ChangelogConfig::default()
        };

        let mut entry = entry("1.0.0");
        let mut section = Section::new("Bug Fixes");
        section.add_commit(commit("def4567890abc", Some("parser"), "handle edge case"));
        entry.add_section(section);

        let output = formatter.format(&entry, &config);
        assert!(output.starts_with("## [1.0.0] - 2024-05-01\n\n"));
        assert!(output.contains("- **parser:** handle edge case\n"));
    }

    #[test]
    fn test_breaking_changes_use_footer_note() {
        let formatter = MarkdownFormatter::new(MarkdownStyle::Conventional);
        let config = ChangelogConfig::default();

        let mut breaking = commit("break123456789", None, "remove deprecated API");
        breaking.breaking = true;
        breaking.footers.push(Footer {
            token: "BREAKING CHANGE".to_string(),
            value: "`init` no longer accepts a path".to_string(),
        });

        let mut entry = entry("2.0.0");
        entry.add_breaking_change(breaking);

        let output = formatter.format(&entry, &config);
        assert!(output.contains("### ⚠ BREAKING CHANGES\n\n"));
        assert!(output.contains("* `init` no longer accepts a path (break12)"));
    }

    #[test]
    fn test_links_with_repo_url() {
        let formatter = MarkdownFormatter::new(MarkdownStyle::Conventional);
        let config = ChangelogConfig {
            repo_url: Some("https://github.com/test/repo/".to_string()),
            include_authors: true,
            ..ChangelogConfig::default()
        };

        let mut entry = entry("1.1.0").with_tags(Some("v1.0.0".to_string()), Some("v1.1.0".to_string()));
        let mut section = Section::new("Features");
        section.add_commit(commit("abc1234567890", None, "feature"));
        entry.add_section(section);

        let output = formatter.format(&entry, &config);
        assert!(output.starts_with(
            "## [1.1.0](https://github.com/test/repo/compare/v1.0.0...v1.1.0) (2024-05-01)"
        ));
        assert!(output.contains("([abc1234](https://github.com/test/repo/commit/abc1234567890)) - Test"));
    }

    #[test]
    fn test_empty_entry_is_heading_only() {
        let formatter = MarkdownFormatter::new(MarkdownStyle::Conventional);
        let output = formatter.format(&entry("1.0.0"), &ChangelogConfig::default());
        assert_eq!(output, "## [1.0.0] (2024-05-01)\n\n");
    }
}
