//! Exit codes for the CLI

use scrivener_core::{ChangelogError, ConfigError, GitError, ScrivenerError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Rendering error
pub const RENDER_ERROR: i32 = 4;

/// Reading or writing the changelog failed
pub const IO_ERROR: i32 = 5;

/// Lifecycle hook failed
pub const HOOK_ERROR: i32 = 6;

/// Map a command failure to its exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ScrivenerError>() {
            return for_scrivener_error(e);
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if let Some(e) = cause.downcast_ref::<ChangelogError>() {
            return match e {
                ChangelogError::ReadFailed { .. } | ChangelogError::WriteFailed { .. } => IO_ERROR,
                _ => RENDER_ERROR,
            };
        }
    }
    ERROR
}

fn for_scrivener_error(err: &ScrivenerError) -> i32 {
    match err {
        ScrivenerError::Config(_) => CONFIG_ERROR,
        ScrivenerError::Git(_) => GIT_ERROR,
        e if e.is_render_error() => RENDER_ERROR,
        ScrivenerError::Changelog(_) | ScrivenerError::Io(_) => IO_ERROR,
        ScrivenerError::Hook(_) => HOOK_ERROR,
        ScrivenerError::Other(_) => ERROR,
    }
}
