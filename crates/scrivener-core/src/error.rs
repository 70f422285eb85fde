//! Error types for Scrivener

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ScrivenerError
pub type Result<T> = std::result::Result<T, ScrivenerError>;

/// Main error type for Scrivener operations
#[derive(Debug, Error)]
pub enum ScrivenerError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog rendering and document errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Lifecycle hook errors
    #[error(transparent)]
    Hook(#[from] HookError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Starting revision of a commit range could not be resolved
    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog rendering and document errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The configured rendering preset does not exist
    #[error("Unknown changelog preset '{0}'")]
    UnknownPreset(String),

    /// The renderer could not produce a release section
    #[error("Failed to render changelog: {0}")]
    RenderFailed(String),

    /// The changelog document exists but could not be read
    #[error("Failed to read changelog {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The changelog document could not be written
    #[error("Failed to write changelog {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lifecycle hook errors
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook command could not be started
    #[error("Hook '{stage}' could not run `{command}`: {message}")]
    SpawnFailed {
        stage: String,
        command: String,
        message: String,
    },

    /// The hook command exited unsuccessfully
    #[error("Hook '{stage}' failed: `{command}` exited with {}", exit_label(.code))]
    ExitStatus {
        stage: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl ScrivenerError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Whether this error was raised while producing the rendered section
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::Git(_)
                | Self::Changelog(ChangelogError::UnknownPreset(_))
                | Self::Changelog(ChangelogError::RenderFailed(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_exit_status_message() {
        let err = HookError::ExitStatus {
            stage: "pre-changelog".to_string(),
            command: "exit 3".to_string(),
            code: Some(3),
            stderr: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Hook 'pre-changelog' failed: `exit 3` exited with status 3"
        );
    }

    #[test]
    fn test_render_error_classification() {
        let err: ScrivenerError = ChangelogError::UnknownPreset("angular".to_string()).into();
        assert!(err.is_render_error());

        let err: ScrivenerError = GitError::RevisionNotFound("v9.9.9".to_string()).into();
        assert!(err.is_render_error());

        let err: ScrivenerError = ChangelogError::WriteFailed {
            path: PathBuf::from("CHANGELOG.md"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
        .into();
        assert!(!err.is_render_error());
    }
}
