//! Which parsed commits get listed in a release section

use std::collections::HashSet;

use scrivener_core::config::ChangelogConfig;

/// Listing rules shared by the renderer and its parser
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Types that own a section; empty lists every type
    pub listed_types: HashSet<String>,
    /// Types that are parsed but never listed
    pub hidden_types: HashSet<String>,
    /// Parse merge commits instead of skipping them
    pub include_merges: bool,
}

impl ParserConfig {
    /// Listing rules for the commit types configured in `config`
    pub fn from_changelog(config: &ChangelogConfig) -> Self {
        let mut parser = Self::default();
        for (name, commit_type) in &config.types {
            parser = if commit_type.hidden {
                parser.hide_type(name)
            } else {
                parser.list_type(name)
            };
        }
        parser
    }

    pub fn list_type(mut self, type_name: impl Into<String>) -> Self {
        self.listed_types.insert(type_name.into());
        self
    }

    pub fn hide_type(mut self, type_name: impl Into<String>) -> Self {
        self.hidden_types.insert(type_name.into());
        self
    }

    pub fn with_merges(mut self, include: bool) -> Self {
        self.include_merges = include;
        self
    }

    /// Whether `commit_type` belongs in a section
    pub fn lists(&self, commit_type: &str) -> bool {
        if self.hidden_types.contains(commit_type) {
            return false;
        }
        self.listed_types.is_empty() || self.listed_types.contains(commit_type)
    }
}
