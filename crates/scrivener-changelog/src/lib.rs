//! Scrivener Changelog - Changelog synthesis for versioned projects
//!
//! This crate turns commit history into a release section and merges it into
//! an existing changelog document:
//!
//! - [`VersionGate`] decides which tagged commits are release boundaries
//! - [`ConventionalRenderer`] renders one release with a markdown preset
//! - [`DocumentMerger`] keeps prior history below the new section
//! - [`FileMaterializer`] reads, creates and writes the document
//! - [`ChangelogPipeline`] runs everything between the lifecycle hooks

pub mod formatter;
pub mod gate;
pub mod materializer;
pub mod merge;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod renderer;
pub mod source;
pub mod types;

pub use formatter::{ChangelogFormatter, MarkdownFormatter, MarkdownStyle, PresetRegistry};
pub use gate::{Admission, GateResult, ReleaseCandidate, ReleaseGate, VersionGate};
pub use materializer::{EnsuredDocument, FileMaterializer, NullObserver, OutputObserver};
pub use merge::{ChangelogDocument, DocumentMerger};
pub use options::{DebugSink, SynthesisOptions, TracingSink};
pub use parser::{CommitParser, ConventionalParser};
pub use pipeline::{ChangelogPipeline, PipelineOptions, PipelineOutcome, PipelineStage};
pub use renderer::{ChangelogRenderer, ConventionalRenderer, RenderContext, RenderRequest, RenderedRelease};
pub use source::{last_eligible_tag, CommitSource};
pub use types::{ChangelogEntry, ParsedCommit, Section};
