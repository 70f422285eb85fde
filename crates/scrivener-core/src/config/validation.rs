//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_hooks(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let changelog = &config.changelog;

    if changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty"));
    }

    if changelog.preset.trim().is_empty() {
        return Err(invalid("changelog.preset", "preset cannot be empty"));
    }

    if changelog.tag_prefix.chars().any(char::is_whitespace) {
        return Err(invalid(
            "changelog.tag_prefix",
            "tag prefix cannot contain whitespace",
        ));
    }

    for (name, type_config) in &changelog.types {
        if type_config.section.trim().is_empty() {
            return Err(invalid(
                &format!("changelog.types.{}.section", name),
                "section title cannot be empty",
            ));
        }
    }

    Ok(())
}

fn validate_hooks(config: &Config) -> Result<()> {
    let hooks = [
        ("hooks.pre_changelog", &config.hooks.pre_changelog),
        ("hooks.post_changelog", &config.hooks.post_changelog),
    ];

    for (field, command) in hooks {
        if command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(invalid(field, "hook command cannot be blank"));
        }
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::ScrivenerError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
