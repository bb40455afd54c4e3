//! GitHub Pull Requests API endpoint implementations.

use reqwest::Method;
use tracing::{info, instrument, trace};

use crate::client::{GitHubClient, RequestOptions};
use crate::error::GitHubError;
use crate::models::PullRequest;

impl GitHubClient {
  /// Get a specific pull request by number
  #[instrument(skip(self), level = "debug")]
  pub async fn get_pull_request(&self, owner: &str, repo: &str, pr_number: u64) -> Result<PullRequest, GitHubError> {
    info!("Fetching pull request #{} for {}/{}", pr_number, owner, repo);

    let endpoint = format!("/repos/{owner}/{repo}/pulls/{pr_number}");
    let pull_request: PullRequest = self
      .call_typed(&endpoint, Method::GET, false, &RequestOptions::default())
      .await?;

    trace!("Pull request: {:?}", pull_request);
    Ok(pull_request)
  }
}
