//! Issue comment endpoints.

use reqwest::Method;
use tracing::{debug, info, instrument};

use crate::client::{GitHubClient, RequestOptions};
use crate::consts::COMMENTS_PER_PAGE;
use crate::error::GitHubError;
use crate::models::{Comment, CreateComment};

impl GitHubClient {
  /// Get the last `amount` comments of an issue or pull request.
  ///
  /// Only the first page is read unless `amount` exceeds the page size, in
  /// which case every page is fetched.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_comments(
    &self,
    owner: &str,
    repo: &str,
    issue_number: u64,
    amount: usize,
  ) -> Result<Vec<Comment>, GitHubError> {
    info!("Fetching comments of #{} in {}/{}", issue_number, owner, repo);

    let endpoint = format!("/repos/{owner}/{repo}/issues/{issue_number}/comments");
    let depaginate = amount > COMMENTS_PER_PAGE;
    let mut comments: Vec<Comment> = self
      .call_typed(&endpoint, Method::GET, depaginate, &RequestOptions::default())
      .await?;

    let skip = comments.len().saturating_sub(amount);
    debug!("Received {} comments, keeping {}", comments.len(), comments.len() - skip);
    Ok(comments.split_off(skip))
  }

  /// Post a new comment on an issue or pull request
  #[instrument(skip(self, body), level = "debug")]
  pub async fn post_comment(
    &self,
    owner: &str,
    repo: &str,
    issue_number: u64,
    body: &str,
  ) -> Result<Comment, GitHubError> {
    info!("Posting comment on #{} in {}/{}", issue_number, owner, repo);

    let endpoint = format!("/repos/{owner}/{repo}/issues/{issue_number}/comments");
    let payload = serde_json::to_value(CreateComment { body }).map_err(|source| GitHubError::Decode {
      endpoint: endpoint.clone(),
      source,
    })?;

    self
      .call_typed(&endpoint, Method::POST, false, &RequestOptions::default().with_json(payload))
      .await
  }
}
