//! # GitHub HTTP Client
//!
//! Low-level gateway to the GitHub REST API. Every endpoint goes through
//! [`GitHubClient::call`], which builds the URL, attaches the standard headers
//! and the active token, turns error statuses into [`GitHubError::Api`] and
//! optionally follows `Link: rel="next"` pagination.

use std::fmt;

use ghoul_core::Credentials;
use reqwest::header::{self, AUTHORIZATION};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use crate::consts::{ACCEPT, API_BASE_URL, USER_AGENT};
use crate::error::{ApiError, GitHubError};
use crate::pagination::next_page_url;

/// Username and password sent as HTTP basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
  pub user: String,
  pub password: String,
}

impl BasicAuth {
  pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      user: user.into(),
      password: password.into(),
    }
  }
}

impl fmt::Debug for BasicAuth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BasicAuth")
      .field("user", &self.user)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Extra request parameters passed through to every page of a call
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
  pub json: Option<Value>,
  /// Replaces the token header for this request
  pub basic_auth: Option<BasicAuth>,
}

impl RequestOptions {
  pub fn with_json(mut self, body: Value) -> Self {
    self.json = Some(body);
    self
  }

  pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
    self.basic_auth = Some(auth);
    self
  }
}

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  credentials: Option<Credentials>,
}

impl Default for GitHubClient {
  fn default() -> Self {
    Self::new(API_BASE_URL)
  }
}

impl GitHubClient {
  /// Create a client without credentials
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self {
      client: Client::new(),
      base_url,
      credentials: None,
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Replace the active credentials. The token is not validated.
  pub fn set_token(&mut self, credentials: Credentials) {
    debug!("Using token {} for {}", credentials.token_id, credentials.user);
    self.credentials = Some(credentials);
  }

  pub fn credentials(&self) -> Option<&Credentials> {
    self.credentials.as_ref()
  }

  /// Absolute URL for an endpoint path. Absolute URLs are used unchanged.
  pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, GitHubError> {
    let raw = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
      endpoint.to_string()
    } else {
      format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    };

    Url::parse(&raw).map_err(|_| GitHubError::InvalidUrl(raw))
  }

  /// Call an endpoint and return its JSON body.
  ///
  /// Returns `Ok(None)` for an empty body. With `depaginate` every page
  /// linked through `rel="next"` is requested with the same method and
  /// options, and the array elements of all pages are concatenated.
  #[instrument(skip(self, options), level = "debug")]
  pub async fn call(
    &self,
    endpoint: &str,
    method: Method,
    depaginate: bool,
    options: &RequestOptions,
  ) -> Result<Option<Value>, GitHubError> {
    let url = self.endpoint_url(endpoint)?;
    let response = self.send(&method, url, options).await?;

    if !depaginate {
      return parse_body(endpoint, response).await;
    }

    let mut items = Vec::new();
    let mut response = response;
    let mut page = 1;
    loop {
      let next = next_page_url(response.headers());
      match parse_body(endpoint, response).await? {
        Some(Value::Array(elements)) => {
          trace!("Page {} of {} holds {} items", page, endpoint, elements.len());
          items.extend(elements);
        }
        None => {}
        Some(_) => {
          return Err(GitHubError::UnexpectedShape {
            endpoint: endpoint.to_string(),
            expected: "a JSON array on every page",
          });
        }
      }

      let Some(next) = next else {
        break;
      };
      page += 1;
      let url = Url::parse(&next).map_err(|_| GitHubError::InvalidUrl(next.clone()))?;
      response = self.send(&method, url, options).await?;
    }

    debug!("Collected {} items from {} page(s) of {}", items.len(), page, endpoint);
    Ok(Some(Value::Array(items)))
  }

  /// Call an endpoint and decode its body into `T`
  pub(crate) async fn call_typed<T: DeserializeOwned>(
    &self,
    endpoint: &str,
    method: Method,
    depaginate: bool,
    options: &RequestOptions,
  ) -> Result<T, GitHubError> {
    let value = self
      .call(endpoint, method, depaginate, options)
      .await?
      .ok_or_else(|| GitHubError::UnexpectedShape {
        endpoint: endpoint.to_string(),
        expected: "a JSON body",
      })?;

    serde_json::from_value(value).map_err(|source| GitHubError::Decode {
      endpoint: endpoint.to_string(),
      source,
    })
  }

  async fn send(&self, method: &Method, url: Url, options: &RequestOptions) -> Result<Response, GitHubError> {
    trace!("{} {}", method, url);

    let mut request = self
      .client
      .request(method.clone(), url)
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT);

    request = match (&options.basic_auth, &self.credentials) {
      (Some(auth), _) => request.basic_auth(&auth.user, Some(&auth.password)),
      (None, Some(credentials)) => request.header(AUTHORIZATION, format!("token {}", credentials.token)),
      (None, None) => request,
    };

    if let Some(body) = &options.json {
      request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    debug!("GitHub API response status: {}", status);

    if status.is_success() {
      return Ok(response);
    }

    let error = ApiError::from_response(response).await;
    if error.is_rate_limited() {
      warn!("GitHub API rate limit exhausted");
    } else {
      warn!("GitHub API error: HTTP {} - {}", status, error.text);
    }
    Err(GitHubError::Api(error))
  }
}

async fn parse_body(endpoint: &str, response: Response) -> Result<Option<Value>, GitHubError> {
  let text = response.text().await?;
  if text.trim().is_empty() {
    return Ok(None);
  }

  serde_json::from_str(&text)
    .map(Some)
    .map_err(|source| GitHubError::Decode {
      endpoint: endpoint.to_string(),
      source,
    })
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{header, header_exists, method, path, query_param};
  use wiremock::{Mock, MockServer, Request, ResponseTemplate};

  use super::*;

  fn authed_client(uri: String) -> GitHubClient {
    let mut client = GitHubClient::new(uri);
    client.set_token(Credentials::new("octocat", "1", "test_token"));
    client
  }

  #[test]
  fn test_endpoint_url_keeps_base_path() {
    let client = GitHubClient::new("https://ghe.example.com/api/v3/");

    assert_eq!(
      client.endpoint_url("/repos/o/r/issues/1").unwrap().as_str(),
      "https://ghe.example.com/api/v3/repos/o/r/issues/1"
    );
    assert_eq!(
      client.endpoint_url("https://api.github.com/x?page=2").unwrap().as_str(),
      "https://api.github.com/x?page=2"
    );
  }

  #[test]
  fn test_invalid_base_url() {
    let client = GitHubClient::new("not a url");
    assert!(matches!(client.endpoint_url("/user"), Err(GitHubError::InvalidUrl(_))));
  }

  #[tokio::test]
  async fn test_token_header_when_authenticated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/user"))
      .and(header("authorization", "token test_token"))
      .and(header("accept", ACCEPT))
      .and(header("user-agent", USER_AGENT))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "octocat" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let client = authed_client(mock_server.uri());
    let body = client
      .call("/user", Method::GET, false, &RequestOptions::default())
      .await
      .unwrap();

    assert_eq!(body, Some(json!({ "login": "octocat" })));
  }

  #[tokio::test]
  async fn test_no_authorization_header_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(|request: &Request| {
        if request.headers.contains_key("authorization") {
          ResponseTemplate::new(500)
        } else {
          ResponseTemplate::new(200).set_body_json(json!({ "login": "anonymous" }))
        }
      })
      .mount(&mock_server)
      .await;

    let client = GitHubClient::new(mock_server.uri());
    assert!(client.credentials().is_none());

    let body = client
      .call("/user", Method::GET, false, &RequestOptions::default())
      .await
      .unwrap();
    assert_eq!(body, Some(json!({ "login": "anonymous" })));
  }

  #[tokio::test]
  async fn test_basic_auth_replaces_token() {
    let mock_server = MockServer::start().await;

    // "alice:secret"
    Mock::given(method("GET"))
      .and(path("/authorizations"))
      .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let client = authed_client(mock_server.uri());
    let options = RequestOptions::default().with_basic_auth(BasicAuth::new("alice", "secret"));
    let body = client
      .call("/authorizations", Method::GET, false, &options)
      .await
      .unwrap();

    assert_eq!(body, Some(json!([])));
  }

  #[tokio::test]
  async fn test_json_body_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/echo"))
      .and(header_exists("content-type"))
      .respond_with(|request: &Request| {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        ResponseTemplate::new(201).set_body_json(body)
      })
      .mount(&mock_server)
      .await;

    let client = authed_client(mock_server.uri());
    let options = RequestOptions::default().with_json(json!({ "body": "hi" }));
    let body = client.call("/echo", Method::POST, false, &options).await.unwrap();

    assert_eq!(body, Some(json!({ "body": "hi" })));
  }

  #[tokio::test]
  async fn test_empty_body_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
      .and(path("/authorizations/7"))
      .respond_with(ResponseTemplate::new(204))
      .mount(&mock_server)
      .await;

    let client = authed_client(mock_server.uri());
    let body = client
      .call("/authorizations/7", Method::DELETE, false, &RequestOptions::default())
      .await
      .unwrap();

    assert_eq!(body, None);
  }

  #[tokio::test]
  async fn test_error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/repos/o/r/issues/404"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
      .mount(&mock_server)
      .await;

    let client = authed_client(mock_server.uri());
    let error = client
      .call("/repos/o/r/issues/404", Method::GET, false, &RequestOptions::default())
      .await
      .unwrap_err();

    let api = error.api().expect("expected an API error");
    assert_eq!(api.status.as_u16(), 404);
    assert_eq!(api.message(), Some("Not Found"));
  }

  #[tokio::test]
  async fn test_rate_limit_is_detected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(
        ResponseTemplate::new(403)
          .insert_header("x-ratelimit-remaining", "0")
          .set_body_json(json!({ "message": "API rate limit exceeded" })),
      )
      .mount(&mock_server)
      .await;

    let client = authed_client(mock_server.uri());
    let error = client
      .call("/user", Method::GET, false, &RequestOptions::default())
      .await
      .unwrap_err();

    assert!(error.api().is_some_and(ApiError::is_rate_limited));
  }

  #[tokio::test]
  async fn test_depaginate_follows_next_links() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
      .and(path("/items"))
      .and(query_param("page", "2"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("link", format!("<{uri}/items?page=3>; rel=\"next\", <{uri}/items?page=1>; rel=\"first\"").as_str())
          .set_body_json(json!([3, 4])),
      )
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/items"))
      .and(query_param("page", "3"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("link", format!("<{uri}/items?page=1>; rel=\"first\"").as_str())
          .set_body_json(json!([5])),
      )
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/items"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("link", format!("<{uri}/items?page=2>; rel=\"next\"").as_str())
          .set_body_json(json!([1, 2])),
      )
      .with_priority(10)
      .mount(&mock_server)
      .await;

    let client = authed_client(uri.clone());
    let body = client
      .call("/items", Method::GET, true, &RequestOptions::default())
      .await
      .unwrap();

    assert_eq!(body, Some(json!([1, 2, 3, 4, 5])));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(
      requests
        .iter()
        .all(|request| request.headers.get("authorization").is_some_and(|v| v == "token test_token"))
    );
  }

  #[tokio::test]
  async fn test_without_depaginate_only_first_page() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
      .and(path("/items"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("link", format!("<{uri}/items?page=2>; rel=\"next\"").as_str())
          .set_body_json(json!([1, 2])),
      )
      .expect(1)
      .mount(&mock_server)
      .await;

    let client = authed_client(uri);
    let body = client
      .call("/items", Method::GET, false, &RequestOptions::default())
      .await
      .unwrap();

    assert_eq!(body, Some(json!([1, 2])));
  }

  #[tokio::test]
  async fn test_depaginate_rejects_non_array_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/items"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 1 })))
      .mount(&mock_server)
      .await;

    let client = authed_client(mock_server.uri());
    let error = client
      .call("/items", Method::GET, true, &RequestOptions::default())
      .await
      .unwrap_err();

    assert!(matches!(error, GitHubError::UnexpectedShape { .. }));
  }

  #[tokio::test]
  async fn test_error_on_later_page_aborts() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
      .and(path("/items"))
      .and(query_param("page", "2"))
      .respond_with(ResponseTemplate::new(502))
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/items"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("link", format!("<{uri}/items?page=2>; rel=\"next\"").as_str())
          .set_body_json(json!([1])),
      )
      .with_priority(10)
      .mount(&mock_server)
      .await;

    let client = authed_client(uri);
    let error = client
      .call("/items", Method::GET, true, &RequestOptions::default())
      .await
      .unwrap_err();

    assert_eq!(error.api().map(|api| api.status.as_u16()), Some(502));
  }
}
