//! Scrivener Core - Core library for changelog synthesis
//!
//! This crate provides the error taxonomy, configuration loading and the
//! lifecycle hook runner shared by the Scrivener crates.

pub mod config;
pub mod error;
pub mod hooks;

pub use error::{ChangelogError, ConfigError, GitError, HookError, Result, ScrivenerError};
pub use hooks::{Hook, HookContext, HookResult, HookRunner, HookStage, Lifecycle};
