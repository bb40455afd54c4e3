//! # Review Command
//!
//! Checks out the head branch of a pull request, fetching it from the
//! contributor's fork.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use ghoul_core::git::{checkout_remote_branch, fetch_fork};
use ghoul_core::output::{format_repo_name, print_error, print_info, print_success};
use ghoul_gh::GitHubError;
use tracing::debug;

use crate::session::Session;

/// Command for checking out a pull request
#[derive(Args)]
pub struct ReviewArgs {
  /// Number of the pull request
  #[arg(value_name = "PULL_REQUEST")]
  pub pull_request: u64,
}

/// Handle the review command
pub fn handle_review_command(args: ReviewArgs, remote: Option<&str>) -> Result<ExitCode> {
  let Some(session) = Session::start(remote)? else {
    return Ok(ExitCode::FAILURE);
  };
  let target = &session.target;

  let lookup = session.client.get_pull_request(&target.owner, &target.repo, args.pull_request);
  let pull_request = match session.block_on(lookup) {
    Ok(pull_request) => pull_request,
    Err(GitHubError::Api(error)) if error.is_rate_limited() => {
      print_error(&error.to_string());
      return Ok(ExitCode::FAILURE);
    }
    Err(GitHubError::Api(error)) => {
      debug!("Pull request lookup failed: {}", error);
      print_error(&format!(
        "Couldn't find pull request #{} in {}.",
        args.pull_request,
        format_repo_name(&target.full_name())
      ));
      print_info("Make sure the number is correct and that you have read permissions for this GitHub repository.");
      return Ok(ExitCode::FAILURE);
    }
    Err(error) => return Err(error.into()),
  };

  let branch = pull_request.head.ref_name;
  let Some(head_repo) = pull_request.head.repo else {
    print_error(&format!(
      "The repository holding the branch of pull request #{} no longer exists.",
      args.pull_request
    ));
    return Ok(ExitCode::FAILURE);
  };
  let fork_owner = head_repo.owner.login;

  print_info(&format!("Fetching {fork_owner}/{branch} from {}", head_repo.clone_url));
  fetch_fork(&session.repo, &head_repo.clone_url, &branch, &fork_owner)?;
  let commit = checkout_remote_branch(&session.repo, &branch, &fork_owner)?;

  print_success(&format!(
    "Checked out {fork_owner}/{branch} at {} (detached HEAD)",
    short_id(&commit.to_string())
  ));
  Ok(ExitCode::SUCCESS)
}

fn short_id(id: &str) -> &str {
  id.get(..7).unwrap_or(id)
}
