//! # Prompts Module
//!
//! Provides a custom dialoguer theme for ghoul's interactive prompts and the
//! login prompt used when a new API token has to be created.

use std::fmt;

use anyhow::{Context, Result};
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

/// Returns a custom dialoguer theme matching ghoul's color palette.
pub fn ghoul_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().magenta().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

/// A username and password pair typed in by the user
#[derive(Clone, PartialEq, Eq)]
pub struct Login {
  pub user: String,
  pub password: String,
}

impl Login {
  pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      user: user.into(),
      password: password.into(),
    }
  }
}

impl fmt::Debug for Login {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Login")
      .field("user", &self.user)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Source of login details for the authorization flow.
///
/// Called once per attempt; after a rejected password it is asked again.
pub trait LoginPrompt {
  fn prompt_login(&mut self) -> Result<Login>;
}

/// Asks for the login on the terminal
#[derive(Debug, Default)]
pub struct TerminalLoginPrompt;

impl LoginPrompt for TerminalLoginPrompt {
  fn prompt_login(&mut self) -> Result<Login> {
    let theme = ghoul_theme();

    let user: String = Input::with_theme(&theme)
      .with_prompt("GitHub username")
      .interact_text()
      .context("Failed to read GitHub username")?;
    let user = user.trim().to_string();

    let password = Password::with_theme(&theme)
      .with_prompt(format!("Password for '{user}'"))
      .interact()
      .context("Failed to read GitHub password")?;

    Ok(Login { user, password })
  }
}
