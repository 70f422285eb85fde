//! Hook System - Execute shell commands around changelog synthesis
//!
//! Hooks run custom commands at two points of the changelog lifecycle:
//! - pre-changelog: before the existing document is read and rendering starts
//! - post-changelog: after the merged document is written (or printed)
//!
//! Both stages receive the same [`HookContext`].
//!
//! A hook that cannot be spawned or exits unsuccessfully is fatal: the
//! caller must not continue with any later stage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, instrument, warn};

use crate::config::HooksConfig;
use crate::error::{HookError, Result};

/// Hook lifecycle stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// Before changelog generation
    PreChangelog,
    /// After changelog generation
    PostChangelog,
}

impl HookStage {
    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreChangelog => "pre-changelog",
            Self::PostChangelog => "post-changelog",
        }
    }

    /// Parse stage from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "pre-changelog" | "prechangelog" => Some(Self::PreChangelog),
            "post-changelog" | "postchangelog" => Some(Self::PostChangelog),
            _ => None,
        }
    }

    /// Get all stages in order
    pub fn all() -> &'static [HookStage] {
        &[Self::PreChangelog, Self::PostChangelog]
    }
}

impl std::fmt::Display for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hook command to execute
#[derive(Debug, Clone)]
pub struct Hook {
    /// The command to run
    pub command: String,
    /// Working directory (defaults to the runner's base directory)
    pub cwd: Option<PathBuf>,
    /// Environment variables to set
    pub env: HashMap<String, String>,
    /// Description for logging
    pub description: Option<String>,
}

impl Hook {
    /// Create a new hook with just a command
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
            env: HashMap::new(),
            description: None,
        }
    }

    /// Set the working directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Result of executing a hook
#[derive(Debug, Clone)]
pub struct HookResult {
    /// The stage that was executed
    pub stage: HookStage,
    /// The command that was run
    pub command: String,
    /// Exit code if available
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Execution time in milliseconds
    pub duration_ms: u64,
}

/// Hook execution context, exported to the command as environment variables
#[derive(Debug, Clone, Default)]
pub struct HookContext {
    /// Version being released
    pub version: Option<String>,
    /// Version of the last eligible tag
    pub previous_version: Option<String>,
    /// Tag of the release being generated
    pub tag: Option<String>,
    /// Changelog document path
    pub changelog_file: Option<PathBuf>,
    /// Whether this is a dry run
    pub dry_run: bool,
    /// Additional custom variables
    pub custom: HashMap<String, String>,
}

impl HookContext {
    /// Create a new hook context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the previous version
    pub fn with_previous_version(mut self, version: impl Into<String>) -> Self {
        self.previous_version = Some(version.into());
        self
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the changelog document path
    pub fn with_changelog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.changelog_file = Some(path.into());
        self
    }

    /// Set dry run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Add a custom variable
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Convert context to environment variables
    pub fn to_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        if let Some(ref v) = self.version {
            env.insert("SCRIVENER_VERSION".to_string(), v.clone());
        }
        if let Some(ref v) = self.previous_version {
            env.insert("SCRIVENER_PREVIOUS_VERSION".to_string(), v.clone());
        }
        if let Some(ref v) = self.tag {
            env.insert("SCRIVENER_TAG".to_string(), v.clone());
        }
        if let Some(ref path) = self.changelog_file {
            env.insert(
                "SCRIVENER_CHANGELOG".to_string(),
                path.to_string_lossy().to_string(),
            );
        }
        env.insert("SCRIVENER_DRY_RUN".to_string(), self.dry_run.to_string());

        for (k, v) in &self.custom {
            env.insert(format!("SCRIVENER_{}", k.to_uppercase()), v.clone());
        }

        env
    }
}

/// Something that can run the commands bound to a lifecycle stage.
///
/// A stage without a command succeeds as a no-op. Any failure is returned
/// as an error and the caller stops.
pub trait Lifecycle {
    /// Run the hooks registered for `stage`
    fn run(&self, stage: HookStage, context: &HookContext) -> Result<Vec<HookResult>>;
}

/// Hook runner for executing hooks at lifecycle stages
#[derive(Debug, Clone, Default)]
pub struct HookRunner {
    /// Registered hooks by stage
    hooks: HashMap<HookStage, Vec<Hook>>,
    /// Base directory for commands without their own cwd
    base_dir: Option<PathBuf>,
}

impl HookRunner {
    /// Create a new hook runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Register a hook for a stage
    pub fn register(&mut self, stage: HookStage, hook: Hook) {
        self.hooks.entry(stage).or_default().push(hook);
    }

    /// Get hooks for a stage
    pub fn get_hooks(&self, stage: HookStage) -> &[Hook] {
        self.hooks.get(&stage).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Check if there are any hooks for a stage
    pub fn has_hooks(&self, stage: HookStage) -> bool {
        !self.get_hooks(stage).is_empty()
    }

    /// Execute a single hook
    fn execute_hook(
        &self,
        stage: HookStage,
        hook: &Hook,
        context_env: &HashMap<String, String>,
    ) -> Result<HookResult> {
        let start = std::time::Instant::now();

        let cwd = hook.cwd.as_ref().or(self.base_dir.as_ref());

        let shell = if cfg!(windows) { "cmd" } else { "sh" };
        let shell_arg = if cfg!(windows) { "/C" } else { "-c" };

        let mut cmd = Command::new(shell);
        cmd.arg(shell_arg).arg(&hook.command);

        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        for (k, v) in context_env {
            cmd.env(k, v);
        }
        for (k, v) in &hook.env {
            cmd.env(k, v);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().map_err(|e| HookError::SpawnFailed {
            stage: stage.as_str().to_string(),
            command: hook.command.clone(),
            message: e.to_string(),
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            warn!(
                stage = stage.as_str(),
                command = %hook.command,
                code = ?output.status.code(),
                "hook failed"
            );
            return Err(HookError::ExitStatus {
                stage: stage.as_str().to_string(),
                command: hook.command.clone(),
                code: output.status.code(),
                stderr,
            }
            .into());
        }

        debug!(stage = stage.as_str(), duration_ms, "hook finished");
        Ok(HookResult {
            stage,
            command: hook.command.clone(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr,
            duration_ms,
        })
    }
}

impl Lifecycle for HookRunner {
    #[instrument(skip(self, context), fields(stage = stage.as_str()))]
    fn run(&self, stage: HookStage, context: &HookContext) -> Result<Vec<HookResult>> {
        let hooks = self.get_hooks(stage);
        if hooks.is_empty() {
            debug!(stage = stage.as_str(), "no hook configured");
            return Ok(Vec::new());
        }

        let context_env = context.to_env();
        let mut results = Vec::with_capacity(hooks.len());

        for hook in hooks {
            info!(
                stage = stage.as_str(),
                command = %hook.command,
                description = hook.description.as_deref().unwrap_or(""),
                "running lifecycle hook"
            );
            results.push(self.execute_hook(stage, hook, &context_env)?);
        }

        Ok(results)
    }
}

/// Build a HookRunner from the hooks section of the configuration
pub fn build_hook_runner(config: &HooksConfig, base_dir: Option<&Path>) -> HookRunner {
    let mut runner = HookRunner::new();

    if let Some(dir) = base_dir {
        runner = runner.with_base_dir(dir);
    }

    let configured = [
        (HookStage::PreChangelog, &config.pre_changelog),
        (HookStage::PostChangelog, &config.post_changelog),
    ];

    for (stage, command) in configured {
        if let Some(command) = command {
            runner.register(
                stage,
                Hook::new(command.as_str()).with_description(format!("{} hook", stage)),
            );
        }
    }

    runner
}
