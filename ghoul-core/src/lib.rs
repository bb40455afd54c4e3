//! # Ghoul Core Library
//!
//! Shared building blocks for the ghoul CLI and its GitHub client: the on-disk
//! credential store, configuration loading, terminal output and prompts, and
//! the git helpers that map a working copy to the GitHub repository it
//! belongs to.

pub mod config;
pub mod creds;
pub mod git;
pub mod output;
pub mod prompts;

// Re-export main types
pub use config::{ConfigDirs, Settings};
pub use creds::Credentials;
pub use git::{RemoteError, RepoRef, ResolvedRepo, resolve_default_repo, resolve_remote};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use prompts::{Login, LoginPrompt, TerminalLoginPrompt, ghoul_theme};
