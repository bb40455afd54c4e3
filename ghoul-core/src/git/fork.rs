//! Fetching and checking out branches that live on contributors' forks.

use anyhow::{Context, Result};
use git2::build::CheckoutBuilder;
use git2::{ErrorCode, FetchOptions, Oid, Repository};
use tracing::{debug, info};

/// Add (or reuse) a remote for a fork and fetch one of its branches.
///
/// The branch lands in `refs/remotes/<remote_name>/<branch>`. An existing
/// remote with the same name is reused as-is. Returns the fetched commit.
pub fn fetch_fork(repo: &Repository, url: &str, branch: &str, remote_name: &str) -> Result<Oid> {
  let mut remote = match repo.find_remote(remote_name) {
    Ok(remote) => {
      debug!("Reusing existing remote '{}'", remote_name);
      remote
    }
    Err(err) if err.code() == ErrorCode::NotFound => {
      info!("Adding remote '{}' for {}", remote_name, url);
      repo
        .remote(remote_name, url)
        .with_context(|| format!("Failed to add remote '{remote_name}'"))?
    }
    Err(err) => return Err(err).with_context(|| format!("Failed to look up remote '{remote_name}'")),
  };

  let tracking_ref = remote_branch_ref(remote_name, branch);
  let refspec = format!("+refs/heads/{branch}:{tracking_ref}");
  let mut fetch_options = FetchOptions::new();
  remote
    .fetch(&[refspec.as_str()], Some(&mut fetch_options), None)
    .with_context(|| format!("Failed to fetch '{branch}' from '{remote_name}'"))?;

  let oid = repo
    .refname_to_id(&tracking_ref)
    .with_context(|| format!("Fetched branch '{remote_name}/{branch}' was not found"))?;
  debug!("Fetched {} at {}", tracking_ref, oid);
  Ok(oid)
}

/// Check out `<remote_name>/<branch>` on a detached HEAD.
pub fn checkout_remote_branch(repo: &Repository, branch: &str, remote_name: &str) -> Result<Oid> {
  let tracking_ref = remote_branch_ref(remote_name, branch);
  let commit = repo
    .find_reference(&tracking_ref)
    .with_context(|| format!("Branch '{remote_name}/{branch}' not found"))?
    .peel_to_commit()
    .with_context(|| format!("Failed to peel '{remote_name}/{branch}' to a commit"))?;

  // Update the working tree and index before moving HEAD so the index
  // matches the checked-out tree.
  repo
    .checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))
    .with_context(|| format!("Failed to checkout tree for '{remote_name}/{branch}'"))?;
  repo
    .set_head_detached(commit.id())
    .with_context(|| format!("Failed to move HEAD to '{remote_name}/{branch}'"))?;

  Ok(commit.id())
}

fn remote_branch_ref(remote_name: &str, branch: &str) -> String {
  format!("refs/remotes/{remote_name}/{branch}")
}
