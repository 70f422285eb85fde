//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "scrivener.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "scrivener.toml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".scrivener.toml",
        ".scrivener.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Scrivener Configuration

changelog:
  enabled: true
  file: CHANGELOG.md
  preset: conventional
  tag_prefix: v
  skip_unstable: false
  include_hashes: true
  include_authors: false
  types:
    feat:
      section: Features
    fix:
      section: Bug Fixes
    perf:
      section: Performance Improvements
    revert:
      section: Reverts
    docs:
      section: Documentation
      hidden: true
    chore:
      section: Chores
      hidden: true

hooks:
  pre_changelog: null
  post_changelog: null
"#;
