//! Changelog formatters

mod markdown;
mod registry;

pub use markdown::{MarkdownFormatter, MarkdownStyle};
pub use registry::PresetRegistry;

use scrivener_core::config::ChangelogConfig;

use crate::types::ChangelogEntry;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a changelog entry to string
    fn format(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> String;

    /// Preset name this formatter is registered under
    fn name(&self) -> &'static str;
}
