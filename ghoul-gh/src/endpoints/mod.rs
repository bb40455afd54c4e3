//! # GitHub API Endpoints
//!
//! Typed wrappers around [`GitHubClient::call`](crate::client::GitHubClient::call)
//! for the issue, pull request, comment and authorization resources.

pub mod authorizations;
pub mod comments;
pub mod issues;
pub mod pulls;
