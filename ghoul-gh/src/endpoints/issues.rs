//! GitHub Issues API endpoint implementations.

use reqwest::Method;
use tracing::{info, instrument, trace};

use crate::client::{GitHubClient, RequestOptions};
use crate::error::GitHubError;
use crate::models::Issue;

impl GitHubClient {
  /// Get a specific issue by number.
  ///
  /// # Errors
  ///
  /// Returns an error if the issue is not found, authentication fails,
  /// the request cannot be sent, or the response cannot be parsed.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_issue(&self, owner: &str, repo: &str, issue_number: u64) -> Result<Issue, GitHubError> {
    info!("Fetching issue #{} for {}/{}", issue_number, owner, repo);

    let endpoint = format!("/repos/{owner}/{repo}/issues/{issue_number}");
    let issue: Issue = self
      .call_typed(&endpoint, Method::GET, false, &RequestOptions::default())
      .await?;

    trace!("Issue: {:?}", issue);
    Ok(issue)
  }
}
