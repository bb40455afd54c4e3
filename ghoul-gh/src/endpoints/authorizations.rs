//! OAuth Authorizations API: creating, listing and deleting the personal
//! tokens ghoul authenticates with. Every call here uses basic auth with the
//! account password, never the stored token.

use ghoul_core::Credentials;
use reqwest::Method;
use tracing::{debug, info, instrument};

use crate::client::{BasicAuth, GitHubClient, RequestOptions};
use crate::consts::TOKEN_NOTE_URL;
use crate::error::GitHubError;
use crate::models::{AuthorizationToken, CreateAuthorization};

/// Note attached to the tokens created from this machine
pub fn token_note() -> String {
  let host = hostname::get()
    .map(|h| h.to_string_lossy().to_string())
    .unwrap_or_else(|_| "Unknown".to_string());
  format!("Ghoul ({host})")
}

impl GitHubClient {
  /// Create a new token and make it the active credentials
  #[instrument(skip(self, password), level = "debug")]
  pub async fn create_token(&mut self, user: &str, password: &str, scopes: &[&str]) -> Result<Credentials, GitHubError> {
    info!("Creating a GitHub token for {}", user);

    let endpoint = "/authorizations";
    let request = CreateAuthorization {
      scopes: scopes.iter().map(|scope| scope.to_string()).collect(),
      note: token_note(),
      note_url: TOKEN_NOTE_URL.to_string(),
    };
    let payload = serde_json::to_value(&request).map_err(|source| GitHubError::Decode {
      endpoint: endpoint.to_string(),
      source,
    })?;
    let options = RequestOptions::default()
      .with_json(payload)
      .with_basic_auth(BasicAuth::new(user, password));

    let authorization: AuthorizationToken = self.call_typed(endpoint, Method::POST, false, &options).await?;
    let token = authorization.token.ok_or_else(|| GitHubError::UnexpectedShape {
      endpoint: endpoint.to_string(),
      expected: "a token in the created authorization",
    })?;

    let credentials = Credentials::new(user, authorization.id.to_string(), token);
    self.set_token(credentials.clone());
    Ok(credentials)
  }

  /// List every authorization of the account
  #[instrument(skip(self, auth), level = "debug")]
  pub async fn list_authorizations(&self, auth: &BasicAuth) -> Result<Vec<AuthorizationToken>, GitHubError> {
    let options = RequestOptions::default().with_basic_auth(auth.clone());
    let authorizations: Vec<AuthorizationToken> =
      self.call_typed("/authorizations", Method::GET, true, &options).await?;

    debug!("Found {} authorizations for {}", authorizations.len(), auth.user);
    Ok(authorizations)
  }

  /// Revoke an authorization
  #[instrument(skip(self, auth), level = "debug")]
  pub async fn delete_authorization(&self, id: u64, auth: &BasicAuth) -> Result<(), GitHubError> {
    info!("Deleting authorization {}", id);

    let options = RequestOptions::default().with_basic_auth(auth.clone());
    self
      .call(&format!("/authorizations/{id}"), Method::DELETE, false, &options)
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{body_partial_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  // base64("alice:secret")
  const ALICE_BASIC: &str = "Basic YWxpY2U6c2VjcmV0";

  #[test]
  fn test_token_note_format() {
    let note = token_note();
    assert!(note.starts_with("Ghoul ("));
    assert!(note.ends_with(')'));
  }

  #[tokio::test]
  async fn test_create_token_sets_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/authorizations"))
      .and(header("authorization", ALICE_BASIC))
      .and(body_partial_json(json!({
        "scopes": ["repo"],
        "note": token_note(),
        "note_url": TOKEN_NOTE_URL
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({
        "id": 321,
        "token": "ghp_new",
        "note": token_note(),
        "app": { "name": token_note(), "url": TOKEN_NOTE_URL }
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let mut client = GitHubClient::new(mock_server.uri());
    let credentials = client.create_token("alice", "secret", &["repo"]).await.unwrap();

    assert_eq!(credentials, Credentials::new("alice", "321", "ghp_new"));
    assert_eq!(client.credentials(), Some(&credentials));
  }

  #[tokio::test]
  async fn test_create_token_uses_password_not_stored_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/authorizations"))
      .and(header("authorization", ALICE_BASIC))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({
        "id": 2,
        "token": "ghp_second",
        "app": { "name": token_note() }
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let mut client = GitHubClient::new(mock_server.uri());
    client.set_token(Credentials::new("alice", "1", "ghp_old"));

    let credentials = client.create_token("alice", "secret", &["repo"]).await.unwrap();
    assert_eq!(credentials.token, "ghp_second");
  }

  #[tokio::test]
  async fn test_create_token_failure_keeps_previous_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/authorizations"))
      .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
      .mount(&mock_server)
      .await;

    let mut client = GitHubClient::new(mock_server.uri());
    let error = client.create_token("alice", "wrong", &["repo"]).await.unwrap_err();

    assert!(error.api().is_some_and(|api| api.is_bad_credentials()));
    assert!(client.credentials().is_none());
  }

  #[tokio::test]
  async fn test_list_and_delete_authorizations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/authorizations"))
      .and(header("authorization", ALICE_BASIC))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
        { "id": 1, "note": "other", "app": { "name": "Some app" } },
        { "id": 2, "note": token_note(), "app": { "name": token_note() } }
      ])))
      .mount(&mock_server)
      .await;

    Mock::given(method("DELETE"))
      .and(path("/authorizations/2"))
      .and(header("authorization", ALICE_BASIC))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    let client = GitHubClient::new(mock_server.uri());
    let auth = BasicAuth::new("alice", "secret");

    let authorizations = client.list_authorizations(&auth).await.unwrap();
    assert_eq!(authorizations.len(), 2);
    assert_eq!(authorizations[1].app.name, token_note());

    client.delete_authorization(2, &auth).await.unwrap();
  }
}
