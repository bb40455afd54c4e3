//! Repository discovery helpers.

use std::env;
use std::path::Path;

use git2::Repository;

/// Open the git repository containing the current directory, if any.
pub fn current_repository() -> Option<Repository> {
  let current_dir = env::current_dir().ok()?;
  repository_from_path(&current_dir)
}

/// Open the git repository containing `path` or one of its parents.
pub fn repository_from_path<P: AsRef<Path>>(path: P) -> Option<Repository> {
  Repository::discover(path.as_ref()).ok()
}

#[cfg(test)]
mod tests {
  use ghoul_test_utils::GitRepoTestGuard;

  use super::*;

  #[test]
  fn repository_from_nested_path() {
    let git_repo = GitRepoTestGuard::new();
    let nested = git_repo.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();

    let repo = repository_from_path(&nested).unwrap();
    assert_eq!(
      std::fs::canonicalize(repo.workdir().unwrap()).unwrap(),
      std::fs::canonicalize(git_repo.path()).unwrap()
    );
  }
}
