//! Changelog command

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use tracing::info;

use scrivener_changelog::{
    ChangelogPipeline, ConventionalRenderer, NullObserver, OutputObserver, PipelineOptions,
    PipelineOutcome, SynthesisOptions, TracingSink,
};
use scrivener_core::config::{load_config_or_default, ChangelogConfig};
use scrivener_core::hooks::build_hook_runner;
use scrivener_core::ScrivenerError;
use scrivener_git::GitRepo;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Label used when no version is given
const UNRELEASED: &str = "Unreleased";

/// Synthesize the changelog for a release
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Version being released (defaults to "Unreleased")
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Print the result instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Changelog file (defaults to the configured file)
    #[arg(long, value_name = "PATH")]
    pub infile: Option<PathBuf>,

    /// Header placed above the newest release
    #[arg(long)]
    pub header: Option<String>,

    /// Rendering preset (conventional, keepachangelog)
    #[arg(long)]
    pub preset: Option<String>,

    /// Prefix of version tags
    #[arg(long, value_name = "PREFIX")]
    pub tag_prefix: Option<String>,

    /// Do not treat numeric pre-releases such as 2.0.0-5 as releases
    #[arg(long)]
    pub skip_unstable: bool,

    /// Only include commits touching this path (relative to the repository root)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Start the commit window after this revision
    #[arg(long, value_name = "REV")]
    pub from: Option<String>,

    /// Skip changelog synthesis entirely
    #[arg(long)]
    pub skip_changelog: bool,
}

/// Prints the would-be document in dry-run
struct PrintObserver;

impl OutputObserver for PrintObserver {
    fn observe(&self, _path: &Path, text: &str) {
        println!("{}", output::framed(text));
    }
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = ?self.version, dry_run = self.dry_run, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        if let Some(path) = &config_path {
            info!(path = %path.display(), "loaded configuration");
        }

        let changelog = self.apply_overrides(config.changelog);
        let options = self.pipeline_options(&cwd, &changelog, cli.verbose);

        let repo = GitRepo::discover(&cwd).map_err(ScrivenerError::from)?;
        let hooks = build_hook_runner(&config.hooks, Some(&cwd));
        let renderer = ConventionalRenderer::new(changelog);

        let observer: &dyn OutputObserver = match (cli.format, cli.quiet) {
            (OutputFormat::Text, false) => &PrintObserver,
            _ => &NullObserver,
        };

        let outcome = ChangelogPipeline::new(&repo, &renderer, &hooks, observer).run(&options)?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            OutputFormat::Text if !cli.quiet => report(&outcome, &options),
            OutputFormat::Text => {}
        }

        Ok(())
    }

    /// Command-line flags take precedence over the configuration file
    fn apply_overrides(&self, mut changelog: ChangelogConfig) -> ChangelogConfig {
        if let Some(infile) = &self.infile {
            changelog.file = infile.clone();
        }
        if let Some(header) = &self.header {
            changelog.header = header.clone();
        }
        if let Some(preset) = &self.preset {
            changelog.preset = preset.clone();
        }
        if let Some(prefix) = &self.tag_prefix {
            changelog.tag_prefix = prefix.clone();
        }
        if self.skip_unstable {
            changelog.skip_unstable = true;
        }
        if let Some(path) = &self.path {
            changelog.path = Some(path.clone());
        }
        if let Some(from) = &self.from {
            changelog.from = Some(from.clone());
        }
        if self.skip_changelog {
            changelog.enabled = false;
        }
        changelog
    }

    fn pipeline_options(
        &self,
        cwd: &Path,
        changelog: &ChangelogConfig,
        verbose: bool,
    ) -> PipelineOptions {
        let mut synthesis = SynthesisOptions::new(&changelog.tag_prefix, &changelog.preset)
            .with_skip_unstable(changelog.skip_unstable);
        if verbose {
            synthesis = synthesis.with_debug(Arc::new(TracingSink));
        }

        let version = self
            .version
            .clone()
            .unwrap_or_else(|| UNRELEASED.to_string());

        let mut options = PipelineOptions::new(cwd.join(&changelog.file), version);
        options.header = changelog.header.clone();
        options.from = changelog.from.clone();
        options.path = changelog.path.clone();
        options.repo_url = changelog.repo_url.clone();
        options.dry_run = self.dry_run;
        options.skip_changelog = !changelog.enabled;
        options.synthesis = synthesis;
        options
    }
}

fn report(outcome: &PipelineOutcome, options: &PipelineOptions) {
    let Some(version) = &outcome.version else {
        output::info("Changelog skipped");
        return;
    };

    let path = output::path_style().apply_to(options.infile.display());
    if outcome.document_created {
        output::info(&format!("Created {}", path));
    }

    let version = output::version_style().apply_to(version);
    if outcome.written {
        output::success(&format!("Changelog for {} written to {}", version, path));
    } else {
        output::warning(&format!(
            "Dry run: changelog for {} not written to {}",
            version, path
        ));
    }
}
