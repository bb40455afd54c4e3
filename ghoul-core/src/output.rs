//! # Output Formatting
//!
//! Colored, emoji-prefixed user-facing messages shared by the CLI and the
//! interactive authorization flow.

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the global `owo_colors` override
  pub fn apply(self) {
    match self {
      ColorMode::Yes | ColorMode::Always => owo_colors::set_override(true),
      ColorMode::No | ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Auto => owo_colors::unset_override(),
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.if_supports_color(owo_colors::Stream::Stdout, |c| c.green()), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.if_supports_color(owo_colors::Stream::Stderr, |c| c.red()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.if_supports_color(owo_colors::Stream::Stdout, |c| c.yellow()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.if_supports_color(owo_colors::Stream::Stdout, |c| c.blue()), message);
}

/// Format a repository name such as `owner/repo`
pub fn format_repo_name(name: &str) -> String {
  name.if_supports_color(owo_colors::Stream::Stdout, |n| n.bright_cyan()).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("check_mark", "✓");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_format_repo_name_keeps_text() {
    assert!(format_repo_name("octocat/hello").contains("octocat/hello"));
  }
}
