//! Errors returned by the GitHub gateway client.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use thiserror::Error;

/// Header carrying the number of requests left in the rate-limit window
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

#[derive(Debug, Error)]
pub enum GitHubError {
  /// The API answered with a 4xx or 5xx status
  #[error("{0}")]
  Api(ApiError),

  #[error("Request to GitHub failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Failed to decode response from {endpoint}: {source}")]
  Decode {
    endpoint: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Unexpected response from {endpoint}: expected {expected}")]
  UnexpectedShape { endpoint: String, expected: &'static str },

  #[error("Invalid request URL '{0}'")]
  InvalidUrl(String),

  /// Reading login details from the user failed
  #[error(transparent)]
  Interaction(anyhow::Error),
}

impl GitHubError {
  /// The API error, when this is one
  pub fn api(&self) -> Option<&ApiError> {
    match self {
      GitHubError::Api(error) => Some(error),
      _ => None,
    }
  }
}

/// Body GitHub sends alongside an error status
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ApiErrorBody {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub errors: Vec<ApiErrorDetail>,
  #[serde(default)]
  pub documentation_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
  #[serde(default)]
  pub code: Option<String>,
  #[serde(default)]
  pub field: Option<String>,
  #[serde(default)]
  pub resource: Option<String>,
}

/// A non-success HTTP response
#[derive(Debug, Clone)]
pub struct ApiError {
  pub status: StatusCode,
  /// Raw response body
  pub text: String,
  pub body: ApiErrorBody,
  rate_limit_exhausted: bool,
}

impl ApiError {
  pub fn new(status: StatusCode, headers: &HeaderMap, text: String) -> Self {
    let body = serde_json::from_str(&text).unwrap_or_default();
    let rate_limit_exhausted = headers
      .get(RATE_LIMIT_REMAINING)
      .and_then(|value| value.to_str().ok())
      .is_some_and(|value| value.trim() == "0");

    Self {
      status,
      text,
      body,
      rate_limit_exhausted,
    }
  }

  /// Read the status, headers and body of a failed response
  pub(crate) async fn from_response(response: reqwest::Response) -> Self {
    let status = response.status();
    let headers = response.headers().clone();
    let text = response.text().await.unwrap_or_default();
    Self::new(status, &headers, text)
  }

  pub fn message(&self) -> Option<&str> {
    self.body.message.as_deref()
  }

  /// Code of the first entry in the `errors` list
  pub fn first_error_code(&self) -> Option<&str> {
    self.body.errors.first().and_then(|detail| detail.code.as_deref())
  }

  pub fn is_bad_credentials(&self) -> bool {
    self.status == StatusCode::UNAUTHORIZED && self.message() == Some("Bad credentials")
  }

  pub fn is_already_exists(&self) -> bool {
    self.status == StatusCode::UNPROCESSABLE_ENTITY && self.first_error_code() == Some("already_exists")
  }

  pub fn is_rate_limited(&self) -> bool {
    matches!(self.status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) && self.rate_limit_exhausted
  }
}

impl std::fmt::Display for ApiError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if self.is_rate_limited() {
      return write!(f, "GitHub API rate limit exceeded (HTTP {})", self.status.as_u16());
    }

    match self.message() {
      Some(message) => write!(f, "GitHub API error: HTTP {} - {}", self.status.as_u16(), message),
      None => write!(f, "GitHub API error: HTTP {}", self.status.as_u16()),
    }
  }
}
