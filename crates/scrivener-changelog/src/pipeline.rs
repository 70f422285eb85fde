//! Orchestration of one changelog synthesis run
//!
//! ```text
//! Start -> PreHook -> EnsureDocument -> Render -> Merge -> WriteOrPrint -> PostHook -> Done
//! ```
//!
//! Any failure moves to `Failed` and is returned to the caller; nothing that
//! already happened is rolled back. With `skip_changelog` the run goes
//! straight from `Start` to `Done`.

use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use scrivener_core::error::Result;
use scrivener_core::hooks::{HookContext, HookStage, Lifecycle};
use scrivener_git::CommitRange;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::gate::{parse_version, VersionGate};
use crate::materializer::{FileMaterializer, OutputObserver};
use crate::options::SynthesisOptions;
use crate::renderer::{ChangelogRenderer, RenderContext, RenderRequest};
use crate::source::{last_eligible_tag, CommitSource};

/// Stages of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Start,
    PreHook,
    EnsureDocument,
    Render,
    Merge,
    WriteOrPrint,
    PostHook,
    Done,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::PreHook => "pre-hook",
            Self::EnsureDocument => "ensure-document",
            Self::Render => "render",
            Self::Merge => "merge",
            Self::WriteOrPrint => "write-or-print",
            Self::PostHook => "post-hook",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Inputs of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Changelog document path
    pub infile: PathBuf,
    /// Header placed above the newest release
    pub header: String,
    /// Label of the release being generated
    pub version: String,
    /// Explicit starting revision of the commit window
    pub from: Option<String>,
    /// Only consider commits touching this path
    pub path: Option<PathBuf>,
    /// Repository URL for compare and commit links
    pub repo_url: Option<String>,
    pub dry_run: bool,
    pub skip_changelog: bool,
    pub synthesis: SynthesisOptions,
}

impl PipelineOptions {
    pub fn new(infile: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            infile: infile.into(),
            header: String::new(),
            version: version.into(),
            from: None,
            path: None,
            repo_url: None,
            dry_run: false,
            skip_changelog: false,
            synthesis: SynthesisOptions::default(),
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutcome {
    /// Final stage, `Done` for a completed run
    pub stage: PipelineStage,
    /// Stages visited in order
    pub stages: Vec<PipelineStage>,
    /// Whether the document did not exist before the run
    pub document_created: bool,
    /// Label of the rendered release
    pub version: Option<String>,
    /// Final document text, absent when the changelog was skipped
    pub text: Option<String>,
    /// True when written to disk, false when only observed
    pub written: bool,
}

impl PipelineOutcome {
    fn skipped() -> Self {
        Self {
            stage: PipelineStage::Done,
            stages: vec![PipelineStage::Start, PipelineStage::Done],
            document_created: false,
            version: None,
            text: None,
            written: false,
        }
    }
}

/// Single entry point for synthesizing a changelog
pub struct ChangelogPipeline<'a> {
    source: &'a dyn CommitSource,
    renderer: &'a dyn ChangelogRenderer,
    lifecycle: &'a dyn Lifecycle,
    observer: &'a dyn OutputObserver,
    materializer: FileMaterializer,
}

impl<'a> ChangelogPipeline<'a> {
    pub fn new(
        source: &'a dyn CommitSource,
        renderer: &'a dyn ChangelogRenderer,
        lifecycle: &'a dyn Lifecycle,
        observer: &'a dyn OutputObserver,
    ) -> Self {
        Self {
            source,
            renderer,
            lifecycle,
            observer,
            materializer: FileMaterializer::new(),
        }
    }

    /// Run the pipeline to completion or the first failure
    #[instrument(skip(self, options), fields(infile = %options.infile.display(), version = %options.version, dry_run = options.dry_run))]
    pub fn run(&self, options: &PipelineOptions) -> Result<PipelineOutcome> {
        if options.skip_changelog {
            info!("changelog skipped");
            return Ok(PipelineOutcome::skipped());
        }

        let mut stages = vec![PipelineStage::Start];
        match self.execute(options, &mut stages) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                let failed_at = stages.last().copied().unwrap_or(PipelineStage::Start);
                stages.push(PipelineStage::Failed);
                error!(stage = %failed_at, error = %e, ?stages, "changelog pipeline failed");
                Err(e)
            }
        }
    }

    fn execute(
        &self,
        options: &PipelineOptions,
        stages: &mut Vec<PipelineStage>,
    ) -> Result<PipelineOutcome> {
        let synthesis = &options.synthesis;
        let mut hook_context = HookContext::new()
            .with_version(&options.version)
            .with_changelog_file(&options.infile)
            .with_dry_run(options.dry_run);
        if let Some(version) = parse_version(&options.version) {
            hook_context = hook_context.with_tag(format!("{}{}", synthesis.tag_prefix, version));
        }

        stages.push(PipelineStage::PreHook);
        let gate = VersionGate::from_options(synthesis);
        let last_tag = last_eligible_tag(self.source, &synthesis.tag_prefix, &gate)?;
        if let Some((_, version)) = &last_tag {
            hook_context = hook_context.with_previous_version(version.to_string());
        }
        self.lifecycle.run(HookStage::PreChangelog, &hook_context)?;

        stages.push(PipelineStage::EnsureDocument);
        let document = self
            .materializer
            .ensure_document(&options.infile, options.dry_run)?;
        let document_created = !document.existed;

        stages.push(PipelineStage::Render);
        let from = match (&options.from, document_created, &last_tag) {
            (Some(from), _, _) => Some(from.clone()),
            (None, true, _) => None,
            (None, false, Some((tag, _))) => Some(tag.name.clone()),
            (None, false, None) => None,
        };
        info!(from = ?from, document_created, "commit window selected");

        let mut range = CommitRange {
            from,
            ..CommitRange::default()
        };
        if let Some(path) = &options.path {
            range = range.with_path(path);
        }
        let commits = self.source.commits(&range)?;

        let mut context = RenderContext::new(&options.version).with_date(Utc::now().date_naive());
        if let Some((tag, _)) = &last_tag {
            context = context.with_previous_tag(&tag.name);
        }
        if let Some(url) = &options.repo_url {
            context = context.with_repo_url(url);
        }

        let rendered = self.renderer.render(&RenderRequest {
            commits: &commits,
            options: synthesis,
            context: &context,
        })?;

        stages.push(PipelineStage::Merge);
        let text = self
            .materializer
            .merge(&document.text, &rendered.text, &options.header);

        stages.push(PipelineStage::WriteOrPrint);
        let written =
            self.materializer
                .write_or_observe(&options.infile, &text, options.dry_run, self.observer)?;

        stages.push(PipelineStage::PostHook);
        self.lifecycle.run(HookStage::PostChangelog, &hook_context)?;

        stages.push(PipelineStage::Done);
        info!(
            version = %rendered.version,
            commit_count = rendered.commit_count,
            written,
            "changelog synthesized"
        );

        Ok(PipelineOutcome {
            stage: PipelineStage::Done,
            stages: stages.clone(),
            document_created,
            version: Some(rendered.version),
            text: Some(text),
            written,
        })
    }
}
