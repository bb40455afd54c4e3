//! Constants for the ghoul-gh client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("ghoul/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// Project page attached to every token ghoul creates
pub const TOKEN_NOTE_URL: &str = "https://github.com/YagoGG/ghoul";

/// Scopes requested when authorizing without explicit ones
pub const DEFAULT_SCOPES: &[&str] = &["repo"];

/// Default page size of the issue comments endpoint
pub const COMMENTS_PER_PAGE: usize = 30;
