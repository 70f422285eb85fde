//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use scrivener_core::config::defaults::{
    DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};
use scrivener_core::config::Config;

use crate::cli::{output, Cli};

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, toml = self.toml, "executing init command");
        let cwd = std::env::current_dir()?;
        let path = self.write_config(&cwd)?;

        if !cli.quiet {
            output::success(&format!(
                "Configuration written to {}",
                output::path_style().apply_to(path.display())
            ));
        }
        Ok(())
    }

    /// Write the default configuration below `dir`, returning its path
    fn write_config(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let default_name = if self.toml {
            DEFAULT_CONFIG_TOML
        } else {
            DEFAULT_CONFIG_YAML
        };
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| dir.join(default_name));

        if path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }

        let content = if self.toml {
            toml::to_string_pretty(&Config::default())?
        } else {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        };

        std::fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrivener_core::config::load_config;
    use tempfile::TempDir;

    fn command(toml: bool, force: bool) -> InitCommand {
        InitCommand {
            force,
            toml,
            output: None,
        }
    }

    #[test]
    fn test_writes_loadable_yaml() {
        let temp = TempDir::new().unwrap();
        let path = command(false, false).write_config(temp.path()).unwrap();

        assert_eq!(path, temp.path().join("scrivener.yaml"));
        let config = load_config(&path).unwrap();
        assert_eq!(config.changelog.preset, "conventional");
    }

    #[test]
    fn test_writes_loadable_toml() {
        let temp = TempDir::new().unwrap();
        let path = command(true, false).write_config(temp.path()).unwrap();

        assert_eq!(path, temp.path().join("scrivener.toml"));
        let config = load_config(&path).unwrap();
        assert_eq!(config.changelog.tag_prefix, "v");
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("scrivener.yaml"), "changelog: {}\n").unwrap();

        assert!(command(false, false).write_config(temp.path()).is_err());
        assert!(command(false, true).write_config(temp.path()).is_ok());
    }
}
