//! Git helpers for locating the working copy, resolving which hosted
//! repository it belongs to, and pulling in branches from forks.

pub mod fork;
pub mod remote;
pub mod repository;
pub mod url;

pub use fork::{checkout_remote_branch, fetch_fork};
pub use remote::{
  DEFAULT_HOST, FALLBACK_REMOTES, Remote, RemoteError, RepoRef, ResolvedRepo, resolve_default_repo, resolve_remote,
  tracking_remote,
};
pub use repository::{current_repository, repository_from_path};
pub use url::{GitRemoteScheme, GitUrl};
