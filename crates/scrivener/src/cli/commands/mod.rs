//! CLI commands

mod changelog;
mod completions;
mod init;

pub use changelog::ChangelogCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
