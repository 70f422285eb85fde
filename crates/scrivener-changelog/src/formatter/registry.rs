//! Rendering preset registry

use std::sync::Arc;

use scrivener_core::error::{ChangelogError, Result};

use super::{ChangelogFormatter, MarkdownFormatter, MarkdownStyle};

/// Registry of available rendering presets
pub struct PresetRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl PresetRegistry {
    /// Create a new registry with all built-in presets
    pub fn new() -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::new(MarkdownStyle::Conventional)),
                Arc::new(MarkdownFormatter::new(MarkdownStyle::KeepAChangelog)),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            formatters: Vec::new(),
        }
    }

    /// Register a formatter, shadowing any built-in with the same name
    pub fn register<F: ChangelogFormatter + 'static>(&mut self, formatter: F) {
        self.formatters.insert(0, Arc::new(formatter));
    }

    /// Get formatter by preset name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters.iter().find(|f| f.name() == name).cloned()
    }

    /// Get formatter by preset name, failing for unknown presets
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ChangelogFormatter>> {
        self.get(name)
            .ok_or_else(|| ChangelogError::UnknownPreset(name.to_string()).into())
    }

    /// Get all registered preset names
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let registry = PresetRegistry::new();
        assert_eq!(registry.names(), vec!["conventional", "keepachangelog"]);
        assert!(registry.get("conventional").is_some());
    }

    #[test]
    fn test_unknown_preset() {
        let registry = PresetRegistry::new();
        let err = registry.resolve("angular").err().unwrap();
        assert!(err.to_string().contains("angular"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = PresetRegistry::empty();
        assert!(registry.names().is_empty());
        assert!(registry.resolve("conventional").is_err());
    }
}
