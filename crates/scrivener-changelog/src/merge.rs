//! Merging a rendered section into an existing changelog document

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Start of the most recent release in a changelog: a versioned heading or a
/// legacy `<a name=` anchor
static RELEASE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(^#+ \[?[0-9]+\.[0-9]+\.[0-9]+|<a name=)").expect("Invalid regex")
});

/// An existing changelog split at its first release marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    /// Header that replaces the old preamble
    pub header: String,
    /// Prior history, starting at the first release marker
    pub retained_body: String,
}

impl ChangelogDocument {
    /// Split `existing`, discarding everything above the first release marker
    pub fn parse(existing: &str, header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            retained_body: retained_body(existing).to_string(),
        }
    }

    /// Render the document with `new_section` as the newest release
    pub fn with_section(&self, new_section: &str) -> String {
        let mut out = String::with_capacity(
            self.header.len() + new_section.len() + self.retained_body.len() + 1,
        );
        if !self.header.is_empty() {
            out.push_str(&self.header);
            out.push('\n');
        }
        out.push_str(new_section);
        out.push_str(&self.retained_body);

        let trimmed = out.trim_end_matches('\n').len();
        out.truncate(trimmed);
        out.push('\n');
        out
    }
}

/// Offset of the first release marker in `text`
pub fn release_start(text: &str) -> Option<usize> {
    RELEASE_MARKER.find(text).map(|m| m.start())
}

/// Prior history of `text`; empty when it holds no release yet
pub fn retained_body(text: &str) -> &str {
    match release_start(text) {
        Some(start) => &text[start..],
        None => "",
    }
}

/// Combines new release text with the history of an existing document
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentMerger;

impl DocumentMerger {
    pub fn new() -> Self {
        Self
    }

    /// Header, then `new_section`, then the retained history of `existing`
    pub fn merge(&self, existing: &str, new_section: &str, header: &str) -> String {
        let document = ChangelogDocument::parse(existing, header);
        debug!(
            discarded = existing.len() - document.retained_body.len(),
            retained = document.retained_body.len(),
            "changelog preamble replaced"
        );
        document.with_section(new_section)
    }
}
