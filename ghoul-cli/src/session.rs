//! # Session Startup
//!
//! Everything a command needs before it can talk to GitHub: the local
//! repository, the settings, an authenticated client and the repository on
//! GitHub the working copy belongs to.

use std::future::Future;

use anyhow::{Context, Result};
use ghoul_core::config::Settings;
use ghoul_core::creds::{load_credentials, store_credentials};
use ghoul_core::git::{
  RemoteError, RepoRef, current_repository, resolve_default_repo, resolve_remote,
};
use ghoul_core::output::{format_repo_name, print_error, print_info, print_success};
use ghoul_core::prompts::TerminalLoginPrompt;
use ghoul_gh::{DEFAULT_SCOPES, GitHubClient, GitHubError};
use git2::Repository;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// State shared by the `comment` and `review` commands
pub struct Session {
  runtime: Runtime,
  pub client: GitHubClient,
  pub repo: Repository,
  pub target: RepoRef,
}

impl Session {
  /// Prepare a session for the repository containing the current directory.
  ///
  /// Returns `Ok(None)` once the user has been told why ghoul cannot go on:
  /// no repository, a failed login or no usable remote.
  pub fn start(remote: Option<&str>) -> Result<Option<Self>> {
    let Some(repo) = current_repository() else {
      print_error("Couldn't find a valid Git repository!");
      return Ok(None);
    };

    let settings = Settings::load()?;
    debug!("Settings: {:?}", settings);

    let runtime = Builder::new_current_thread()
      .enable_all()
      .build()
      .context("Failed to create async runtime")?;

    let mut client = GitHubClient::new(settings.api_url.as_str());
    match load_credentials(&settings.credentials_path)? {
      Some(credentials) => client.set_token(credentials),
      None => {
        print_info("No GitHub token found. Log in to create one for ghoul.");
        let mut prompt = TerminalLoginPrompt;
        match runtime.block_on(client.authorize(&mut prompt, DEFAULT_SCOPES)) {
          Ok(credentials) => {
            store_credentials(&settings.credentials_path, &credentials)?;
            print_success(&format!("Logged in to GitHub as {}", credentials.user));
          }
          Err(GitHubError::Interaction(error)) => return Err(error.context("Failed to read the GitHub login")),
          Err(error) => {
            debug!("Authorization failed: {}", error);
            return Ok(None);
          }
        }
      }
    }

    let Some(target) = resolve_target(&repo, remote, &settings.host)? else {
      return Ok(None);
    };
    info!("Working on {}", target.full_name());

    Ok(Some(Self {
      runtime,
      client,
      repo,
      target,
    }))
  }

  /// Drive a gateway call to completion
  pub fn block_on<F: Future>(&self, future: F) -> F::Output {
    self.runtime.block_on(future)
  }
}

/// Find the GitHub repository to operate on.
///
/// An explicit remote is used as-is; otherwise the usual fallback order is
/// applied. Problems the user can fix are printed and yield `Ok(None)`.
pub(crate) fn resolve_target(repo: &Repository, remote: Option<&str>, host: &str) -> Result<Option<RepoRef>> {
  let Some(name) = remote else {
    return match resolve_default_repo(repo, host) {
      Ok(resolved) => {
        debug!("Resolved {}/{} from remote '{}'", resolved.owner, resolved.repo, resolved.remote);
        Ok(Some(RepoRef {
          owner: resolved.owner,
          repo: resolved.repo,
        }))
      }
      Err(error @ (RemoteError::NoTrackingBranch | RemoteError::NoMatchingRemote { .. })) => {
        print_error(&error.to_string());
        Ok(None)
      }
      Err(error) => Err(error).context("Failed to resolve the GitHub repository"),
    };
  };

  match resolve_remote(repo, name, host) {
    Ok(Some(target)) => Ok(Some(target)),
    Ok(None) => {
      print_error(&format!(
        "Remote '{}' does not point to a repository on {}.",
        name,
        format_repo_name(host)
      ));
      Ok(None)
    }
    Err(error @ RemoteError::NotFound(_)) => {
      print_error(&error.to_string());
      Ok(None)
    }
    Err(error) => Err(error).with_context(|| format!("Failed to read remote '{name}'")),
  }
}
