//! Remote resolution.
//!
//! Maps a git remote (or, when none is named, a fallback chain of remotes) to
//! the `owner/repo` pair of the hosted repository it points at.

use git2::{ErrorCode, Repository};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use super::url::GitUrl;

/// Host that remote URLs are matched against unless configured otherwise.
pub const DEFAULT_HOST: &str = "github.com";

/// Remotes tried, in order, before falling back to the current branch's
/// tracking remote.
pub const FALLBACK_REMOTES: [&str; 2] = ["upstream", "origin"];

/// Errors produced while resolving a remote to a hosted repository.
#[derive(Debug, Error)]
pub enum RemoteError {
  /// The named remote is not configured in the repository.
  #[error("No such remote '{0}'")]
  NotFound(String),
  /// HEAD is detached or the current branch has no upstream configured.
  #[error("The current Git branch has no tracking remote.")]
  NoTrackingBranch,
  /// Every fallback candidate was missing or pointed at another host.
  #[error("None of the remotes {} point to a {host} repository", .tried.join(", "))]
  NoMatchingRemote { host: String, tried: Vec<String> },
  /// Wrapper for lower-level errors originating from `git2`.
  #[error(transparent)]
  Git(#[from] git2::Error),
}

/// A configured remote and its URLs, in the order git reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
  pub name: String,
  pub urls: Vec<String>,
}

impl Remote {
  /// Load a remote and every `remote.<name>.url` entry configured for it.
  pub fn load(repo: &Repository, name: &str) -> Result<Self, RemoteError> {
    if let Err(err) = repo.find_remote(name) {
      return Err(match err.code() {
        ErrorCode::NotFound | ErrorCode::InvalidSpec => RemoteError::NotFound(name.to_string()),
        _ => RemoteError::Git(err),
      });
    }

    let config = repo.config()?;
    let mut urls = Vec::new();
    let mut entries = config.multivar(&format!("remote.{name}.url"), None)?;
    while let Some(entry) = entries.next() {
      if let Some(url) = entry?.value() {
        urls.push(url.to_string());
      }
    }

    Ok(Self {
      name: name.to_string(),
      urls,
    })
  }
}

/// Owner and name of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
  pub owner: String,
  pub repo: String,
}

impl RepoRef {
  /// Returns the full repository path as `owner/repo`.
  pub fn full_name(&self) -> String {
    format!("{}/{}", self.owner, self.repo)
  }
}

/// A repository reference together with the remote it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRepo {
  pub owner: String,
  pub repo: String,
  pub remote: String,
}

impl ResolvedRepo {
  fn new(repo_ref: RepoRef, remote: &str) -> Self {
    Self {
      owner: repo_ref.owner,
      repo: repo_ref.repo,
      remote: remote.to_string(),
    }
  }
}

/// Identify the owner and repository a remote points at on `host`.
///
/// Only the first URL of the remote is examined: when it is not on `host` the
/// result is `Ok(None)`, even if a later URL would match.
#[instrument(skip(repo), level = "debug")]
pub fn resolve_remote(repo: &Repository, remote_name: &str, host: &str) -> Result<Option<RepoRef>, RemoteError> {
  let remote = Remote::load(repo, remote_name)?;
  trace!("Remote '{}' URLs: {:?}", remote.name, remote.urls);

  let Some(first_url) = remote.urls.first() else {
    debug!("Remote '{}' has no URLs", remote.name);
    return Ok(None);
  };

  match GitUrl::parse(first_url) {
    Ok(parsed) if parsed.is_on_host(host) => Ok(Some(parsed.into_repo_ref())),
    Ok(parsed) => {
      debug!("Remote '{}' points to {} instead of {}", remote.name, parsed.host, host);
      Ok(None)
    }
    Err(err) => {
      debug!("Could not parse URL of remote '{}': {}", remote.name, err);
      Ok(None)
    }
  }
}

/// Name of the remote the current branch tracks.
pub fn tracking_remote(repo: &Repository) -> Result<String, RemoteError> {
  let head = repo.find_reference("HEAD")?;
  let Some(branch_ref) = head.symbolic_target() else {
    return Err(RemoteError::NoTrackingBranch);
  };

  match repo.branch_upstream_remote(branch_ref) {
    Ok(buf) => buf
      .as_str()
      .map(str::to_string)
      .ok_or(RemoteError::NoTrackingBranch),
    Err(err) if err.code() == ErrorCode::NotFound => Err(RemoteError::NoTrackingBranch),
    Err(err) => Err(RemoteError::Git(err)),
  }
}

/// Determine the repository to operate against when no remote was named.
///
/// Tries `upstream`, then `origin`, then the current branch's tracking remote.
/// Missing remotes and remotes on another host are skipped; any other failure
/// is returned immediately. The tracking remote is only looked up once the
/// named candidates are exhausted.
#[instrument(skip(repo), level = "debug")]
pub fn resolve_default_repo(repo: &Repository, host: &str) -> Result<ResolvedRepo, RemoteError> {
  let mut tried = Vec::new();

  for candidate in FALLBACK_REMOTES {
    if let Some(resolved) = try_candidate(repo, candidate, host, &mut tried)? {
      return Ok(resolved);
    }
  }

  let tracking = tracking_remote(repo)?;
  if !tried.contains(&tracking)
    && let Some(resolved) = try_candidate(repo, &tracking, host, &mut tried)?
  {
    return Ok(resolved);
  }

  Err(RemoteError::NoMatchingRemote {
    host: host.to_string(),
    tried,
  })
}

fn try_candidate(
  repo: &Repository,
  candidate: &str,
  host: &str,
  tried: &mut Vec<String>,
) -> Result<Option<ResolvedRepo>, RemoteError> {
  tried.push(candidate.to_string());

  match resolve_remote(repo, candidate, host) {
    Ok(Some(repo_ref)) => {
      debug!("Resolved {} from remote '{}'", repo_ref.full_name(), candidate);
      Ok(Some(ResolvedRepo::new(repo_ref, candidate)))
    }
    Ok(None) => Ok(None),
    Err(RemoteError::NotFound(name)) => {
      debug!("Remote '{}' does not exist, trying the next one", name);
      Ok(None)
    }
    Err(err) => Err(err),
  }
}
