//! Reading, creating and writing the changelog document

use std::fs;
use std::io;
use std::path::Path;

use scrivener_core::error::{ChangelogError, Result};
use tracing::{debug, info, instrument};

use crate::merge::DocumentMerger;

/// Receives the final document text instead of the file system in dry-run
pub trait OutputObserver {
    fn observe(&self, path: &Path, text: &str);
}

/// Observer that discards output
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl OutputObserver for NullObserver {
    fn observe(&self, _path: &Path, _text: &str) {}
}

/// Contents of the target document before synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredDocument {
    /// False when the document had to be created
    pub existed: bool,
    pub text: String,
}

/// Owns all file-system access for the changelog document
#[derive(Debug, Default, Clone)]
pub struct FileMaterializer {
    merger: DocumentMerger,
}

impl FileMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the document, creating it with a single newline when missing.
    ///
    /// In dry-run a missing document is reported but not created.
    #[instrument(skip(self))]
    pub fn ensure_document(&self, path: &Path, dry_run: bool) -> Result<EnsuredDocument> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(bytes = text.len(), "changelog read");
                Ok(EnsuredDocument {
                    existed: true,
                    text,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let text = "\n".to_string();
                if dry_run {
                    info!(path = %path.display(), "changelog missing, would create it");
                } else {
                    fs::write(path, &text).map_err(|source| ChangelogError::WriteFailed {
                        path: path.to_path_buf(),
                        source,
                    })?;
                    info!(path = %path.display(), "created changelog");
                }
                Ok(EnsuredDocument {
                    existed: false,
                    text,
                })
            }
            Err(source) => Err(ChangelogError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }
            .into()),
        }
    }

    /// Merge `rendered` into `existing` under `header`
    pub fn merge(&self, existing: &str, rendered: &str, header: &str) -> String {
        self.merger.merge(existing, rendered, header)
    }

    /// Write `text` to `path`, or hand it to `observer` in dry-run
    #[instrument(skip(self, text, observer), fields(bytes = text.len()))]
    pub fn write_or_observe(
        &self,
        path: &Path,
        text: &str,
        dry_run: bool,
        observer: &dyn OutputObserver,
    ) -> Result<bool> {
        if dry_run {
            observer.observe(path, text);
            debug!("dry run, changelog not written");
            return Ok(false);
        }

        fs::write(path, text).map_err(|source| ChangelogError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "changelog written");
        Ok(true)
    }
}
