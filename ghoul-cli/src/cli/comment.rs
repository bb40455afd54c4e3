//! # Comment Command
//!
//! Posts a comment on an issue or pull request, asking for the text through
//! the editor when it was not passed on the command line.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use ghoul_core::output::{format_repo_name, print_error, print_info, print_success};
use ghoul_gh::{GitHubClient, GitHubError};
use tracing::debug;

use crate::editor::editor_input;
use crate::session::Session;

/// Shown when the issue has no comments yet
const NO_PREVIOUS_COMMENTS: &str = "<No previous comments>";

/// Command for commenting on an issue or pull request
#[derive(Args)]
pub struct CommentArgs {
  /// Number of the issue or pull request
  #[arg(value_name = "ISSUE")]
  pub issue: u64,

  /// The comment's body, sent as given. Opens the editor when omitted
  #[arg(short, long, value_name = "MESSAGE")]
  pub message: Option<String>,
}

/// Handle the comment command
pub fn handle_comment_command(args: CommentArgs, remote: Option<&str>) -> Result<ExitCode> {
  if args.message.as_deref() == Some("") {
    return Ok(abort_empty());
  }

  let Some(session) = Session::start(remote)? else {
    return Ok(ExitCode::FAILURE);
  };
  let owner = session.target.owner.as_str();
  let repo = session.target.repo.as_str();

  let message = match args.message {
    Some(message) => message,
    None => {
      let Some(template) = session.block_on(editor_template(&session.client, owner, repo, args.issue))? else {
        print_error(&format!(
          "Couldn't find issue #{} in {}.",
          args.issue,
          format_repo_name(&session.target.full_name())
        ));
        return Ok(ExitCode::FAILURE);
      };
      editor_input(&template)?
    }
  };

  if message.is_empty() {
    return Ok(abort_empty());
  }

  let comment = session.block_on(session.client.post_comment(owner, repo, args.issue, &message))?;
  debug!("Created comment {}", comment.id);

  print_success(&format!(
    "Commented on #{} in {}",
    args.issue,
    format_repo_name(&session.target.full_name())
  ));
  if let Some(url) = comment.html_url {
    print_info(&url);
  }

  Ok(ExitCode::SUCCESS)
}

fn abort_empty() -> ExitCode {
  print_error("Aborting comment due to empty message.");
  ExitCode::FAILURE
}

/// Text shown in the editor: instructions, the issue title and its last
/// comment. `None` when the issue does not exist.
async fn editor_template(
  client: &GitHubClient,
  owner: &str,
  repo: &str,
  issue_number: u64,
) -> Result<Option<String>, GitHubError> {
  let issue = match client.get_issue(owner, repo, issue_number).await {
    Ok(issue) => issue,
    Err(GitHubError::Api(error)) if !error.is_rate_limited() => {
      debug!("Issue lookup failed: {}", error);
      return Ok(None);
    }
    Err(error) => return Err(error),
  };

  let last_comment = client
    .get_comments(owner, repo, issue_number, 1)
    .await?
    .pop()
    .map(|comment| comment.body);

  Ok(Some(comment_template(issue_number, &issue.title, last_comment.as_deref())))
}

/// Instructions plus context for writing a comment
pub(crate) fn comment_template(issue_number: u64, title: &str, last_comment: Option<&str>) -> String {
  format!(
    "Please enter the message for your comment. Remember that comments support \
     GitHub Flavored Markdown (GFM). An empty message aborts the operation.\n\n\
     #{issue_number} {title}\n\
     Last comment:\n\
     {}",
    last_comment.unwrap_or(NO_PREVIOUS_COMMENTS)
  )
}
