//! Git repository management for testing
//!
//! This module provides utilities for creating temporary git repositories,
//! wiring up remotes with one or more URLs, and configuring tracking branches.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{Repository, Signature};
use tempfile::TempDir;

/// A test guard that owns a temporary git repository.
///
/// The repository and its directory are removed when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository with a configured test identity
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Ghoul Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "ghoul-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_dir.path().join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Create a test repository that already has an initial commit on HEAD
  pub fn with_initial_commit() -> Self {
    let guard = Self::new();
    create_commit(&guard.repo, "README.md", "# Test", "Initial commit").expect("Failed to create initial commit");
    guard
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a commit on HEAD containing a single file
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  let workdir = repo.workdir().context("Repository has no working directory")?;
  fs::write(workdir.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;
  let signature = Signature::now("Test User", "test@example.com")?;

  match repo.head().and_then(|head| head.peel_to_commit()) {
    Ok(parent) => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?,
    Err(_) => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?,
  };

  Ok(())
}

/// Append another URL to an existing remote, the way `git remote set-url --add`
/// does.
pub fn add_remote_url(repo: &Repository, remote_name: &str, url: &str) -> Result<()> {
  let mut config = repo.config()?;
  // "^$" never matches an existing URL, so the value is appended
  config.set_multivar(&format!("remote.{remote_name}.url"), "^$", url)?;
  Ok(())
}

/// Name of the branch HEAD currently points to
pub fn current_branch_name(repo: &Repository) -> Result<String> {
  let head = repo.head()?;
  head
    .shorthand()
    .map(str::to_string)
    .context("HEAD does not point to a named branch")
}

/// Make the current branch track `remote_name/<branch>`.
pub fn set_tracking_remote(repo: &Repository, remote_name: &str) -> Result<()> {
  let branch = current_branch_name(repo)?;
  let mut config = repo.config()?;
  config.set_str(&format!("branch.{branch}.remote"), remote_name)?;
  config.set_str(&format!("branch.{branch}.merge"), &format!("refs/heads/{branch}"))?;
  Ok(())
}
