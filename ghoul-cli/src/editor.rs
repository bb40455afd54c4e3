//! # Editor Input
//!
//! Collects longer text (comment bodies) through the user's text editor. The
//! editor opens a temporary Markdown file holding an explanatory message and a
//! crop mark; only what the user writes below the mark is returned.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Editor used when `$EDITOR` is not set
pub const DEFAULT_EDITOR: &str = "vi";

/// Column the explanatory message is wrapped at
pub const WRAP_WIDTH: usize = 70;

/// Separates the explanatory message from the user's text
pub const CROP_MARK: &str = "\n\nAnything above this line will be ignored:\n\
  ---------------------------------->8----------------------------------\n";

/// Ask for text through `$EDITOR`, falling back to `vi`
pub fn editor_input(initial_message: &str) -> Result<String> {
  let editor = std::env::var("EDITOR")
    .ok()
    .filter(|value| !value.trim().is_empty())
    .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

  edit_with(&editor, initial_message)
}

/// Ask for text through the given editor command.
///
/// `editor` may carry arguments (`code --wait`); the file path is appended.
pub fn edit_with(editor: &str, initial_message: &str) -> Result<String> {
  let file = tempfile::Builder::new()
    .prefix("ghoul-")
    .suffix(".md")
    .tempfile()
    .context("Failed to create a temporary file for the editor")?;
  fs::write(file.path(), compose(initial_message))
    .with_context(|| format!("Failed to write {}", file.path().display()))?;

  run_editor(editor, file.path())?;

  let content =
    fs::read_to_string(file.path()).with_context(|| format!("Failed to read {}", file.path().display()))?;
  Ok(extract_message(&content))
}

fn run_editor(editor: &str, path: &Path) -> Result<()> {
  let mut parts = editor.split_whitespace();
  let program = parts.next().context("No editor configured")?;

  debug!("Opening {} with {}", path.display(), editor);
  let status = Command::new(program)
    .args(parts)
    .arg(path)
    .status()
    .with_context(|| format!("Failed to launch editor '{editor}'"))?;

  if !status.success() {
    warn!("Editor '{}' exited with {}", editor, status);
  }
  Ok(())
}

/// File content shown to the user: the wrapped message followed by the crop mark
pub fn compose(initial_message: &str) -> String {
  let mut content = wrap_text(initial_message, WRAP_WIDTH);
  content.push_str(CROP_MARK);
  content
}

/// The trimmed text below the crop mark, or an empty string when the mark was
/// removed
pub fn extract_message(content: &str) -> String {
  match content.split_once(CROP_MARK) {
    Some((_, message)) => message.trim().to_string(),
    None => {
      warn!("The crop mark was removed from the file, ignoring its content");
      String::new()
    }
  }
}

/// Wrap every line of `text` at `width` columns, keeping existing line breaks.
/// Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> String {
  text
    .split('\n')
    .map(|line| textwrap::fill(line, width))
    .collect::<Vec<_>>()
    .join("\n")
}
