//! Test utilities shared across the ghoul workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary git repositories ([`GitRepoTestGuard`])
//! - Helpers for wiring up commits, multi-URL remotes and tracking branches
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod git;

// Re-export commonly used items
pub use git::{GitRepoTestGuard, add_remote_url, create_commit, current_branch_name, set_tracking_remote};
