//! Rendering options shared by one synthesis run

use std::fmt;
use std::sync::Arc;

use tracing::debug;

/// Receiver for renderer diagnostics
///
/// Diagnostics never change rendered output.
pub trait DebugSink: Send + Sync {
    /// Record one diagnostic message
    fn debug(&self, message: &str);
}

/// Sink forwarding diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn debug(&self, message: &str) {
        debug!(target: "scrivener::render", "{}", message);
    }
}

/// Options for one changelog synthesis run
#[derive(Clone)]
pub struct SynthesisOptions {
    /// Prefix stripped from tag names to obtain versions
    pub tag_prefix: String,
    /// Number of releases rendered per run
    pub release_count: usize,
    /// Reject pre-releases without a channel name
    pub skip_unstable: bool,
    /// Rendering preset name
    pub preset: String,
    /// Diagnostics sink, if enabled
    pub debug: Option<Arc<dyn DebugSink>>,
}

impl SynthesisOptions {
    /// Create options for a tag prefix and preset
    pub fn new(tag_prefix: impl Into<String>, preset: impl Into<String>) -> Self {
        Self {
            tag_prefix: tag_prefix.into(),
            release_count: 1,
            skip_unstable: false,
            preset: preset.into(),
            debug: None,
        }
    }

    /// Set whether unstable versions are skipped
    pub fn with_skip_unstable(mut self, skip: bool) -> Self {
        self.skip_unstable = skip;
        self
    }

    /// Attach a diagnostics sink
    pub fn with_debug(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.debug = Some(sink);
        self
    }

    /// Send a diagnostic to the sink, if one is attached
    pub fn trace(&self, message: impl FnOnce() -> String) {
        if let Some(sink) = &self.debug {
            sink.debug(&message());
        }
    }
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self::new("v", "conventional")
    }
}

impl fmt::Debug for SynthesisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthesisOptions")
            .field("tag_prefix", &self.tag_prefix)
            .field("release_count", &self.release_count)
            .field("skip_unstable", &self.skip_unstable)
            .field("preset", &self.preset)
            .field("debug", &self.debug.is_some())
            .finish()
    }
}
