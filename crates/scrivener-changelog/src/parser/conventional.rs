//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;

use super::{CommitParser, ParserConfig};
use crate::types::{Footer, ParsedCommit};
use scrivener_git::CommitInfo;

/// Regex for parsing conventional commit headers
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$",
    )
    .expect("Invalid regex")
});

/// Regex for parsing footer lines
static FOOTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>BREAKING CHANGE|[A-Za-z-]+): (?P<value>.+)$").expect("Invalid regex")
});

/// Parser for Conventional Commits format
#[derive(Default)]
pub struct ConventionalParser {
    config: ParserConfig,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a commit message
    fn parse_message(&self, message: &str, body: Option<&str>) -> Option<ParsedMessage> {
        let caps = CONVENTIONAL_REGEX.captures(message)?;

        let commit_type = caps.name("type")?.as_str().to_lowercase();
        let scope = caps.name("scope").map(|m| m.as_str().to_string());
        let breaking_marker = caps.name("breaking").is_some();
        let description = caps.name("description")?.as_str().to_string();

        let (body_text, footers) = match body {
            Some(body) => self.parse_body(body),
            None => (None, Vec::new()),
        };

        let breaking_in_footer = footers.iter().any(Footer::is_breaking);

        Some(ParsedMessage {
            commit_type,
            scope,
            breaking: breaking_marker || breaking_in_footer,
            description,
            body: body_text,
            footers,
        })
    }

    /// Parse the body and extract footers
    fn parse_body(&self, body: &str) -> (Option<String>, Vec<Footer>) {
        let mut footers: Vec<Footer> = Vec::new();
        let mut body_lines = Vec::new();
        let mut in_footer = false;

        for line in body.lines() {
            let footer = FOOTER_REGEX.captures(line).and_then(|caps| {
                Some(Footer {
                    token: caps.name("token")?.as_str().to_string(),
                    value: caps.name("value")?.as_str().to_string(),
                })
            });

            if let Some(footer) = footer {
                in_footer = true;
                footers.push(footer);
            } else if in_footer && line.starts_with(' ') {
                // Continuation of previous footer
                if let Some(last) = footers.last_mut() {
                    last.value.push('\n');
                    last.value.push_str(line.trim());
                }
            } else if !in_footer {
                body_lines.push(line);
            }
        }

        let body_text = body_lines.join("\n").trim().to_string();
        let body_text = if body_text.is_empty() {
            None
        } else {
            Some(body_text)
        };

        (body_text, footers)
    }
}

struct ParsedMessage {
    commit_type: String,
    scope: Option<String>,
    breaking: bool,
    description: String,
    body: Option<String>,
    footers: Vec<Footer>,
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &CommitInfo) -> Option<ParsedCommit> {
        if !self.config.include_merges && commit.is_merge() {
            return None;
        }

        let parsed = self.parse_message(&commit.message, commit.body.as_deref())?;

        Some(ParsedCommit {
            hash: commit.hash.clone(),
            commit_type: parsed.commit_type,
            scope: parsed.scope,
            breaking: parsed.breaking,
            description: parsed.description,
            body: parsed.body,
            footers: parsed.footers,
            author: commit.author.clone(),
            timestamp: commit.timestamp,
        })
    }

    fn should_include(&self, commit: &ParsedCommit) -> bool {
        self.config.lists(&commit.commit_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_commit(message: &str) -> CommitInfo {
        CommitInfo::new(
            "abc1234567890",
            message,
            "Test Author",
            "test@example.com",
            Utc::now(),
        )
    }

    #[test]
    fn test_parse_simple_feat() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("feat: add new feature")).unwrap();

        assert_eq!(parsed.commit_type, "feat");
        assert_eq!(parsed.description, "add new feature");
        assert!(parsed.scope.is_none());
        assert!(!parsed.breaking);
    }

    #[test]
    fn test_parse_with_scope() {
        let parser = ConventionalParser::new();
        let parsed = parser
            .parse(&make_commit("fix(parser): handle edge case"))
            .unwrap();

        assert_eq!(parsed.commit_type, "fix");
        assert_eq!(parsed.scope, Some("parser".to_string()));
        assert_eq!(parsed.description, "handle edge case");
    }

    #[test]
    fn test_parse_breaking_with_scope() {
        let parser = ConventionalParser::new();
        let parsed = parser
            .parse(&make_commit("refactor(core)!: drop legacy config"))
            .unwrap();

        assert_eq!(parsed.commit_type, "refactor");
        assert_eq!(parsed.scope, Some("core".to_string()));
        assert!(parsed.breaking);
    }

    #[test]
    fn test_parse_non_conventional() {
        let parser = ConventionalParser::new();
        assert!(parser
            .parse(&make_commit("Just a regular commit message"))
            .is_none());
    }

    #[test]
    fn test_merge_commits_skipped() {
        let parser = ConventionalParser::new();
        let merge = make_commit("feat: merged work").with_parent_count(2);
        assert!(parser.parse(&merge).is_none());

        let parser = ConventionalParser::with_config(ParserConfig::default().with_merges(true));
        assert!(parser.parse(&merge).is_some());
    }

    #[test]
    fn test_parse_with_footer() {
        let parser = ConventionalParser::new();
        let commit = make_commit("feat: add feature").with_body("Body text\n\nRefs: #123\nFixes: #456");

        let parsed = parser.parse(&commit).unwrap();
        assert_eq!(parsed.body.as_deref(), Some("Body text"));
        assert_eq!(parsed.footers.len(), 2);
        assert_eq!(parsed.footers[0].token, "Refs");
        assert_eq!(parsed.footers[0].value, "#123");
    }

    #[test]
    fn test_breaking_change_footer() {
        let parser = ConventionalParser::new();
        let commit =
            make_commit("feat: add feature").with_body("BREAKING CHANGE: config moved to TOML");

        let parsed = parser.parse(&commit).unwrap();
        assert!(parsed.breaking);
        assert_eq!(parsed.footers[0].token, "BREAKING CHANGE");
    }

    #[test]
    fn test_should_include_hidden_type() {
        let parser = ConventionalParser::with_config(ParserConfig::default().hide_type("chore"));

        let parsed = parser.parse(&make_commit("feat: feature")).unwrap();
        assert!(parser.should_include(&parsed));

        let parsed = parser.parse(&make_commit("chore: cleanup")).unwrap();
        assert!(!parser.should_include(&parsed));
    }
}
