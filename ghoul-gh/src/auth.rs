//! Interactive token authorization.
//!
//! [`GitHubClient::authorize`] asks the user for their login, trades it for a
//! new personal token and recovers from the two failures users actually hit:
//! a mistyped password, and a token for this machine that already exists and
//! has to be revoked before a new one can be issued.

use ghoul_core::output::{print_error, print_warning};
use ghoul_core::{Credentials, Login, LoginPrompt};
use tracing::{debug, info, instrument};

use crate::client::{BasicAuth, GitHubClient};
use crate::endpoints::authorizations::token_note;
use crate::error::GitHubError;

/// Steps of the authorization flow
#[derive(Debug)]
enum AuthState {
  /// Waiting for the user's login
  Prompting,
  /// Requesting a new token
  Creating(Login),
  /// A token for this machine already exists and must be revoked first
  ResolvingConflict(Login),
  Done(Credentials),
  Fatal(GitHubError),
}

impl GitHubClient {
  /// Obtain a new token by asking the user for their GitHub login.
  ///
  /// Wrong credentials make the prompt ask again. When GitHub reports that a
  /// token for this machine already exists, every token named after this
  /// machine is deleted and creation is retried with the same login. Any
  /// other failure is reported and returned.
  #[instrument(skip(self, prompt), level = "debug")]
  pub async fn authorize(&mut self, prompt: &mut dyn LoginPrompt, scopes: &[&str]) -> Result<Credentials, GitHubError> {
    let mut state = AuthState::Prompting;

    loop {
      state = match state {
        AuthState::Prompting => match prompt.prompt_login() {
          Ok(login) => AuthState::Creating(login),
          Err(error) => AuthState::Fatal(GitHubError::Interaction(error)),
        },
        AuthState::Creating(login) => match self.create_token(&login.user, &login.password, scopes).await {
          Ok(credentials) => AuthState::Done(credentials),
          Err(GitHubError::Api(error)) if error.is_bad_credentials() => {
            print_warning("Wrong credentials. Please try again.");
            AuthState::Prompting
          }
          Err(GitHubError::Api(error)) if error.is_already_exists() => {
            info!("A token for this machine already exists");
            AuthState::ResolvingConflict(login)
          }
          Err(error) => {
            report_failure(&error);
            AuthState::Fatal(error)
          }
        },
        AuthState::ResolvingConflict(login) => match self.revoke_machine_tokens(&login).await {
          Ok(0) => {
            debug!("No token named '{}' found, asking for the login again", token_note());
            AuthState::Prompting
          }
          Ok(_) => AuthState::Creating(login),
          Err(error) => {
            report_failure(&error);
            AuthState::Fatal(error)
          }
        },
        AuthState::Done(credentials) => return Ok(credentials),
        AuthState::Fatal(error) => return Err(error),
      };
    }
  }

  /// Delete every token created from this machine, returning how many
  async fn revoke_machine_tokens(&self, login: &Login) -> Result<usize, GitHubError> {
    let auth = BasicAuth::new(&login.user, &login.password);
    let note = token_note();

    let mut revoked = 0;
    for authorization in self.list_authorizations(&auth).await? {
      if authorization.app.name == note {
        self.delete_authorization(authorization.id, &auth).await?;
        revoked += 1;
      }
    }

    Ok(revoked)
  }
}

fn report_failure(error: &GitHubError) {
  match error {
    GitHubError::Api(api) if api.is_rate_limited() => print_error(&api.to_string()),
    GitHubError::Api(api) => {
      print_error("GitHub API HTTP error!");
      eprintln!("{}", api.text);
    }
    other => print_error(&other.to_string()),
  }
}
