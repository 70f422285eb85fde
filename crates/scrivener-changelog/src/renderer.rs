//! Rendering of one release section from a commit stream

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use scrivener_core::config::ChangelogConfig;
use scrivener_core::error::{ChangelogError, Result};
use scrivener_git::CommitInfo;
use tracing::{debug, info, instrument};

use crate::formatter::PresetRegistry;
use crate::gate::{parse_version, Admission, ReleaseCandidate, ReleaseGate, VersionGate};
use crate::options::SynthesisOptions;
use crate::parser::{CommitParser, ConventionalParser, ParserConfig};
use crate::types::{ChangelogEntry, ParsedCommit, Section};

/// Order in which well-known commit types are listed
const TYPE_ORDER: &[&str] = &[
    "feat", "fix", "perf", "revert", "docs", "refactor", "test", "build", "ci", "chore",
];

/// Metadata describing the release being rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Label of the newest block, normally the version being released
    pub version: String,
    /// Date shown for the newest block
    pub date: NaiveDate,
    /// Tag of the release before this one, for compare links
    pub previous_tag: Option<String>,
    /// Repository URL, overriding the configured one
    pub repo_url: Option<String>,
}

impl RenderContext {
    /// Context dated today
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: Utc::now().date_naive(),
            previous_tag: None,
            repo_url: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_previous_tag(mut self, tag: impl Into<String>) -> Self {
        self.previous_tag = Some(tag.into());
        self
    }

    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }
}

/// Input of one render call
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Commits, newest first
    pub commits: &'a [CommitInfo],
    pub options: &'a SynthesisOptions,
    pub context: &'a RenderContext,
}

/// Rendered text for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRelease {
    pub text: String,
    /// Version label of the rendered block
    pub version: String,
    /// Number of commits in the rendered block, before type filtering
    pub commit_count: usize,
}

/// Turns a commit stream into one formatted release section
pub trait ChangelogRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedRelease>;
}

/// Commits grouped under one release heading
#[derive(Debug)]
struct Block {
    version: String,
    tag: Option<String>,
    date: NaiveDate,
    commits: Vec<CommitInfo>,
}

/// Conventional Commits renderer with markdown presets
pub struct ConventionalRenderer {
    parser: Box<dyn CommitParser>,
    presets: PresetRegistry,
    gate: Option<Box<dyn ReleaseGate + Send + Sync>>,
    config: ChangelogConfig,
}

impl ConventionalRenderer {
    /// Create a renderer listing the types of `config`, with the default
    /// presets and version gate
    pub fn new(config: ChangelogConfig) -> Self {
        Self {
            parser: Box::new(ConventionalParser::with_config(
                ParserConfig::from_changelog(&config),
            )),
            presets: PresetRegistry::new(),
            gate: None,
            config,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom preset registry
    pub fn with_presets(mut self, presets: PresetRegistry) -> Self {
        self.presets = presets;
        self
    }

    /// Use a custom generation gate instead of one built from the options
    pub fn with_gate<G: ReleaseGate + Send + Sync + 'static>(mut self, gate: G) -> Self {
        self.gate = Some(Box::new(gate));
        self
    }

    /// Split commits into the head block and the blocks of emitted releases
    fn segment(&self, request: &RenderRequest<'_>) -> (Block, Vec<Block>) {
        let RenderRequest {
            commits,
            options,
            context,
        } = *request;
        let prefix = options.tag_prefix.as_str();
        let default_gate = VersionGate::from_options(options);
        let gate: &dyn ReleaseGate = match &self.gate {
            Some(gate) => gate.as_ref(),
            None => &default_gate,
        };

        let keys: Vec<usize> = commits
            .iter()
            .enumerate()
            .filter(|(_, c)| c.tagged_version(prefix).is_some())
            .map(|(i, _)| i)
            .collect();

        let head_end = keys.first().copied().unwrap_or(commits.len());
        let mut head = Block {
            version: context.version.clone(),
            tag: parse_version(&context.version).map(|v| format!("{}{}", prefix, v)),
            date: context.date,
            commits: commits[..head_end].to_vec(),
        };
        let mut emitted: Vec<Block> = Vec::new();

        for (n, &start) in keys.iter().enumerate() {
            let end = keys.get(n + 1).copied().unwrap_or(commits.len());
            let segment = &commits[start..end];
            let key = &segment[0];
            let mut candidate = ReleaseCandidate::new(
                key.tagged_version(prefix).map(String::from),
                segment.to_vec(),
            );

            let admission = gate.generate_on(&candidate, commits, context);
            options.trace(|| {
                format!(
                    "key commit {} ({:?}): {:?}",
                    key.short_hash, candidate.proposed_version, admission
                )
            });

            match admission {
                Admission::Emit(version) => emitted.push(Block {
                    version: version.to_string(),
                    tag: key.version_tag(prefix).map(String::from),
                    date: key.timestamp.date_naive(),
                    commits: candidate.commits,
                }),
                other => {
                    if other == Admission::Suppress {
                        candidate.proposed_version = None;
                    }
                    let newer = emitted.last_mut().unwrap_or(&mut head);
                    newer.commits.append(&mut candidate.commits);
                }
            }
        }

        (head, emitted)
    }

    /// Group parsed commits into configured sections
    fn build_entry(&self, block: &Block, previous_tag: Option<String>) -> ChangelogEntry {
        let mut entry = ChangelogEntry::new(&block.version)
            .with_date(block.date)
            .with_tags(previous_tag, block.tag.clone());

        let mut grouped: HashMap<String, Vec<ParsedCommit>> = HashMap::new();
        for commit in block.commits.iter().filter_map(|c| self.parser.parse(c)) {
            if commit.breaking {
                entry.add_breaking_change(commit.clone());
            }
            if !self.parser.should_include(&commit) {
                continue;
            }
            grouped
                .entry(commit.commit_type.clone())
                .or_default()
                .push(commit);
        }

        let mut types: Vec<String> = grouped.keys().cloned().collect();
        types.sort_by_key(|t| {
            let rank = TYPE_ORDER
                .iter()
                .position(|known| known == t)
                .unwrap_or(TYPE_ORDER.len());
            (rank, t.clone())
        });

        for commit_type in types {
            let Some(type_config) = self.config.types.get(&commit_type) else {
                continue;
            };
            if type_config.hidden {
                continue;
            }

            let mut section = Section::new(&type_config.section);
            for commit in grouped.remove(&commit_type).unwrap_or_default() {
                section.add_commit(commit);
            }
            entry.add_section(section);
        }

        debug!(
            version = %entry.version,
            section_count = entry.sections.len(),
            breaking_count = entry.breaking_changes.len(),
            "changelog sections built"
        );
        entry
    }
}

impl ChangelogRenderer for ConventionalRenderer {
    #[instrument(skip(self, request), fields(commit_count = request.commits.len(), version = %request.context.version))]
    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedRelease> {
        let options = request.options;
        let formatter = self.presets.resolve(&options.preset)?;

        if request.context.version.trim().is_empty() {
            return Err(ChangelogError::RenderFailed("release version label is empty".into()).into());
        }
        if options.release_count != 1 {
            return Err(ChangelogError::RenderFailed(format!(
                "release count must be 1, got {}",
                options.release_count
            ))
            .into());
        }

        let (head, emitted) = self.segment(request);
        options.trace(|| {
            format!(
                "head block has {} commits, {} emitted releases",
                head.commits.len(),
                emitted.len()
            )
        });

        let (block, previous_tag) = if !head.commits.is_empty() || emitted.is_empty() {
            let previous = emitted
                .first()
                .and_then(|b| b.tag.clone())
                .or_else(|| request.context.previous_tag.clone());
            (&head, previous)
        } else {
            let previous = emitted
                .get(1)
                .and_then(|b| b.tag.clone())
                .or_else(|| request.context.previous_tag.clone());
            (&emitted[0], previous)
        };

        let mut config = self.config.clone();
        if let Some(url) = &request.context.repo_url {
            config.repo_url = Some(url.clone());
        }

        let entry = self.build_entry(block, previous_tag);
        let text = formatter.format(&entry, &config);
        options.trace(|| format!("rendered {} bytes for {}", text.len(), block.version));

        info!(
            version = %block.version,
            commit_count = block.commits.len(),
            preset = formatter.name(),
            "release rendered"
        );

        Ok(RenderedRelease {
            text,
            version: block.version.clone(),
            commit_count: block.commits.len(),
        })
    }
}
