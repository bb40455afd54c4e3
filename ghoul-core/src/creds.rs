//! # Credential Store
//!
//! Reads and writes the personal access token ghoul authenticates with. The
//! file holds three lines:
//!
//! ```text
//! [<username>]
//! <token id>
//! <token>
//! ```
//!
//! A missing file means no credentials have been stored yet.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Name of the credentials file inside the user's home directory
pub const CREDENTIALS_FILE_NAME: &str = ".ghoulconfig";

/// An API token together with the account it belongs to.
///
/// All three values are always present; "no credentials" is expressed as
/// `Option::<Credentials>::None`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub user: String,
  pub token_id: String,
  pub token: String,
}

impl Credentials {
  pub fn new(user: impl Into<String>, token_id: impl Into<String>, token: impl Into<String>) -> Self {
    Self {
      user: user.into(),
      token_id: token_id.into(),
      token: token.into(),
    }
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("user", &self.user)
      .field("token_id", &self.token_id)
      .field("token", &"<redacted>")
      .finish()
  }
}

/// Returns the path of the credentials file for the provided home directory.
pub fn credentials_path(home: &Path) -> PathBuf {
  home.join(CREDENTIALS_FILE_NAME)
}

/// Read stored credentials.
///
/// Returns `Ok(None)` when the file does not exist or does not hold all three
/// values.
pub fn load_credentials(path: &Path) -> Result<Option<Credentials>> {
  if !path.is_file() {
    debug!("No credentials file at {}", path.display());
    return Ok(None);
  }

  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read credentials from {}", path.display()))?;
  let mut lines = content.lines();

  let user = lines
    .next()
    .unwrap_or_default()
    .trim_matches(|c: char| c.is_whitespace() || c == '[' || c == ']');
  let token_id = lines.next().unwrap_or_default().trim();
  let token = lines.next().unwrap_or_default().trim();

  if user.is_empty() || token_id.is_empty() || token.is_empty() {
    warn!("Ignoring incomplete credentials file at {}", path.display());
    return Ok(None);
  }

  Ok(Some(Credentials::new(user, token_id, token)))
}

/// Write credentials, replacing any previous content.
///
/// On Unix the file is restricted to the owner since it holds a live token.
pub fn store_credentials(path: &Path, credentials: &Credentials) -> Result<()> {
  let content = format!(
    "[{}]\n{}\n{}\n",
    credentials.user, credentials.token_id, credentials.token
  );
  fs::write(path, content).with_context(|| format!("Failed to write credentials to {}", path.display()))?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
      .with_context(|| format!("Failed to restrict permissions on {}", path.display()))?;
  }

  debug!("Stored credentials for {} at {}", credentials.user, path.display());
  Ok(())
}
