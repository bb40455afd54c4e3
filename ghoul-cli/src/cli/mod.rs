//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers.

mod comment;
mod review;

use std::process::ExitCode;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use ghoul_core::output::ColorMode;

/// Top-level CLI command for the ghoul tool
#[derive(Parser)]
#[command(name = "ghoul")]
#[command(about = "Comment on GitHub issues and review pull requests from the terminal")]
#[command(
  long_about = "Ghoul talks to GitHub on behalf of the repository you are standing in.\n\n\
        It works out the GitHub repository from your remotes (upstream, then origin,\n\
        then the remote your branch tracks) and authenticates with a personal token\n\
        that is created the first time you run it."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightMagenta.on_default().bold().underline())
    .usage(AnsiColor::Magenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Remote that identifies the GitHub repository
  #[arg(
    short = 'r',
    long = "remote",
    value_name = "REMOTE",
    global = true,
    long_help = "Remote that identifies the GitHub repository.\n\n\
             When omitted, 'upstream' is used, then 'origin', then the remote\n\
             tracked by the current branch."
  )]
  pub remote: Option<String>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the ghoul tool
#[derive(Subcommand)]
pub enum Commands {
  /// Post a comment on an issue or pull request
  #[command(long_about = "Post a comment on an issue or pull request.\n\n\
            Without --message your editor ($EDITOR, or vi) opens with the issue title\n\
            and its last comment for reference. Comments support GitHub Flavored\n\
            Markdown. An empty message aborts the command.")]
  Comment(comment::CommentArgs),

  /// Check out the branch of a pull request
  #[command(long_about = "Check out the branch of a pull request.\n\n\
            Adds a remote named after the author of the pull request (or reuses it),\n\
            fetches the pull request branch and checks it out on a detached HEAD.")]
  Review(review::ReviewArgs),
}

pub fn handle_cli(cli: Cli) -> Result<ExitCode> {
  cli.colors.apply();

  let remote = cli.remote.as_deref();
  match cli.command {
    Commands::Comment(args) => comment::handle_comment_command(args, remote),
    Commands::Review(args) => review::handle_review_command(args, remote),
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_comment_with_message() {
    let cli = Cli::try_parse_from(["ghoul", "-r", "fork", "comment", "12", "-m", "Ship it"]).unwrap();

    assert_eq!(cli.remote.as_deref(), Some("fork"));
    match cli.command {
      Commands::Comment(args) => {
        assert_eq!(args.issue, 12);
        assert_eq!(args.message.as_deref(), Some("Ship it"));
      }
      Commands::Review(_) => unreachable!("parsed the wrong subcommand"),
    }
  }

  #[test]
  fn test_parse_review_with_trailing_global_flags() {
    let cli = Cli::try_parse_from(["ghoul", "review", "7", "--remote", "origin", "-vv"]).unwrap();

    assert_eq!(cli.remote.as_deref(), Some("origin"));
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Commands::Review(ref args) if args.pull_request == 7));
  }

  #[test]
  fn test_issue_number_must_be_numeric() {
    assert!(Cli::try_parse_from(["ghoul", "comment", "abc"]).is_err());
  }
}
