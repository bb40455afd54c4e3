//! # GitHub API Client
//!
//! Gateway to the GitHub REST API used by ghoul: a token-authenticated HTTP
//! client with transparent `Link` header pagination, typed wrappers for the
//! issue, pull request and comment endpoints, and the interactive token
//! authorization flow.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;

// Re-export the client
pub use client::{BasicAuth, GitHubClient, RequestOptions};
pub use consts::DEFAULT_SCOPES;
pub use endpoints::authorizations::token_note;
pub use error::{ApiError, GitHubError};
// Re-export models
pub use models::{AuthorizationApp, AuthorizationToken, Comment, HeadRepository, Issue, PullRequest, PullRequestHead, User};
