use serde::{Deserialize, Serialize};

/// Represents a GitHub user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
  pub login: String,
  #[serde(default)]
  pub id: u64,
}

/// Represents a GitHub issue. Pull requests are issues too.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
  pub number: u64,
  pub title: String,
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default)]
  pub state: Option<String>,
  #[serde(default)]
  pub html_url: Option<String>,
  #[serde(default)]
  pub user: Option<User>,
}

/// Represents a GitHub pull request
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
  pub number: u64,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub html_url: Option<String>,
  pub head: PullRequestHead,
}

/// The branch a pull request proposes to merge
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestHead {
  #[serde(rename = "ref")]
  pub ref_name: String,
  #[serde(default)]
  pub sha: Option<String>,
  /// `None` once the fork has been deleted
  pub repo: Option<HeadRepository>,
}

/// Repository holding a pull request's head branch
#[derive(Debug, Clone, Deserialize)]
pub struct HeadRepository {
  pub full_name: Option<String>,
  pub clone_url: String,
  pub ssh_url: String,
  pub owner: User,
}

/// Represents a comment on an issue or pull request
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
  pub id: u64,
  pub body: String,
  #[serde(default)]
  pub user: Option<User>,
  #[serde(default)]
  pub html_url: Option<String>,
}

/// Application an OAuth authorization was issued to
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationApp {
  pub name: String,
  #[serde(default)]
  pub url: Option<String>,
}

/// An OAuth authorization as returned by `/authorizations`.
///
/// `token` is only filled in by the call that creates it.
#[derive(Clone, Deserialize)]
pub struct AuthorizationToken {
  pub id: u64,
  #[serde(default)]
  pub token: Option<String>,
  #[serde(default)]
  pub note: Option<String>,
  pub app: AuthorizationApp,
}

impl std::fmt::Debug for AuthorizationToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AuthorizationToken")
      .field("id", &self.id)
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .field("note", &self.note)
      .field("app", &self.app)
      .finish()
  }
}

/// Body of `POST /authorizations`
#[derive(Debug, Clone, Serialize)]
pub struct CreateAuthorization {
  pub scopes: Vec<String>,
  pub note: String,
  pub note_url: String,
}

/// Body of `POST /repos/{owner}/{repo}/issues/{number}/comments`
#[derive(Debug, Clone, Serialize)]
pub struct CreateComment<'a> {
  pub body: &'a str,
}
