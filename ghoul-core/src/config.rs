//! # Configuration Management
//!
//! Resolves the settings ghoul runs with: the API base URL, the host remote
//! URLs are matched against, and where credentials are stored. Values come
//! from environment variables, then the optional `config.toml` in the user's
//! config directory, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::creds::credentials_path;
use crate::git::DEFAULT_HOST;

/// Base URL for the official SaaS GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "GHOUL_API_URL";

/// Environment variable overriding the host remotes are matched against
pub const ENV_HOST: &str = "GHOUL_HOST";

/// Environment variable overriding the credentials file location
pub const ENV_CREDENTIALS: &str = "GHOUL_CREDENTIALS";

/// Configuration directories for ghoul
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "ghoul").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
  /// API base URL, e.g. `https://github.example.com/api/v3`
  pub api_url: Option<String>,
  /// Host that remote URLs must point at
  pub host: Option<String>,
  /// Path of the credentials file
  pub credentials: Option<PathBuf>,
}

impl ConfigFile {
  /// Load the configuration file, or the defaults when it does not exist
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!("No config file at {}", path.display());
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
  }
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub api_url: String,
  pub host: String,
  pub credentials_path: PathBuf,
}

impl Settings {
  /// Load settings from the environment, the config file and defaults
  pub fn load() -> Result<Self> {
    let dirs = ConfigDirs::new()?;
    let file = ConfigFile::load(&dirs.config_path())?;
    let base_dirs = BaseDirs::new().context("Could not determine home directory")?;

    Self::resolve(file, |key| std::env::var(key).ok(), base_dirs.home_dir())
  }

  /// Merge the config file with environment overrides.
  ///
  /// `env` looks up an environment variable; empty values count as unset.
  pub fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>, home: &Path) -> Result<Self> {
    let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    let api_url = lookup(ENV_API_URL)
      .or(file.api_url)
      .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let host = lookup(ENV_HOST)
      .or(file.host)
      .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let credentials_path = lookup(ENV_CREDENTIALS)
      .map(PathBuf::from)
      .or(file.credentials)
      .unwrap_or_else(|| credentials_path(home));

    Ok(Self {
      api_url: normalize_base_url(&api_url)?,
      host: host.trim().to_ascii_lowercase(),
      credentials_path,
    })
  }
}

/// Normalize an API base URL.
///
/// Adds `https://` when no scheme is given and drops trailing slashes so
/// endpoint paths can be appended directly.
pub fn normalize_base_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("API URL cannot be empty"));
  }

  let candidate = if trimmed.contains("://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let url = Url::parse(&candidate).with_context(|| format!("Invalid API URL: '{input}'"))?;
  if url.host_str().is_none() {
    return Err(anyhow::anyhow!("API URL has no host: '{input}'"));
  }

  Ok(url.as_str().trim_end_matches('/').to_string())
}
