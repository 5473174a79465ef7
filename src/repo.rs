//! Repository operations seam.
//!
//! The synchronization logic never shells out directly: it goes through the
//! narrow [`RepoOps`] trait so it can be unit-tested against a fake
//! implementation instead of a real working copy. [`GitRepo`] is the
//! production implementation on top of [`crate::git::run_git`].

use crate::error::{PrsyncError, Result};
use crate::git::run_git;
use std::path::{Path, PathBuf};

/// Narrow interface over the version-control working copy.
///
/// Each method maps to a single git invocation; a non-zero exit surfaces as
/// `PrsyncError::GitError` and aborts the calling sequence.
pub trait RepoOps {
    /// Name of the currently checked-out branch (`rev-parse --abbrev-ref HEAD`).
    fn current_branch(&self) -> Result<String>;

    /// Check out an existing branch, propagating submodule references.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Create a new branch at the current HEAD and check it out.
    ///
    /// Fails if the branch already exists (git enforces this for `checkout -b`).
    fn create_branch(&self, branch: &str) -> Result<()>;

    /// Merge the named branch into the currently checked-out branch.
    ///
    /// A merge conflict surfaces as the underlying git error; no automatic
    /// resolution is attempted.
    fn merge(&self, branch: &str) -> Result<()>;

    /// Recursive submodule initialization/update.
    fn submodule_update(&self) -> Result<()>;

    /// Check out `branch` in every submodule, recursively.
    fn submodule_checkout_all(&self, branch: &str) -> Result<()>;

    /// Fetch a pull-request head from origin into a local branch.
    fn fetch_pr_head(&self, pr_number: &str, local_branch: &str) -> Result<()>;

    /// Apply a patch file to the working copy.
    fn apply_patch(&self, patch: &Path) -> Result<()>;

    /// Commit all tracked changes with the given message.
    fn commit_all(&self, message: &str) -> Result<()>;
}

/// Production [`RepoOps`] implementation backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Open the working copy rooted at `root`.
    ///
    /// The directory must contain a checked-out repository; this is not
    /// verified eagerly, the first git invocation fails if it does not.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl RepoOps for GitRepo {
    fn current_branch(&self) -> Result<String> {
        let output = run_git(&self.root, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(output.stdout)
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        run_git(&self.root, &["checkout", "--recurse-submodules", branch])?;
        Ok(())
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        run_git(&self.root, &["checkout", "-b", branch]).map_err(|e| {
            PrsyncError::GitError(format!("failed to create branch '{}': {}", branch, e))
        })?;
        Ok(())
    }

    fn merge(&self, branch: &str) -> Result<()> {
        run_git(&self.root, &["merge", branch])?;
        Ok(())
    }

    fn submodule_update(&self) -> Result<()> {
        run_git(&self.root, &["submodule", "update", "--init", "--recursive"])?;
        Ok(())
    }

    fn submodule_checkout_all(&self, branch: &str) -> Result<()> {
        run_git(
            &self.root,
            &["submodule", "foreach", "--recursive", "git", "checkout", branch],
        )?;
        Ok(())
    }

    fn fetch_pr_head(&self, pr_number: &str, local_branch: &str) -> Result<()> {
        let refspec = format!("pull/{}/head:{}", pr_number, local_branch);
        run_git(&self.root, &["fetch", "origin", &refspec])?;
        Ok(())
    }

    fn apply_patch(&self, patch: &Path) -> Result<()> {
        let patch = patch.to_str().ok_or_else(|| {
            PrsyncError::UserError(format!("patch path is not valid UTF-8: {}", patch.display()))
        })?;
        run_git(&self.root, &["apply", patch])?;
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        run_git(&self.root, &["commit", "-am", message])?;
        Ok(())
    }
}

/// Clone a repository into `parent_dir` (full clone, all branches).
pub fn clone_repo<P: AsRef<Path>>(parent_dir: P, clone_url: &str) -> Result<()> {
    run_git(parent_dir, &["clone", clone_url])?;
    Ok(())
}

/// Clone a single branch of a repository into `parent_dir`.
pub fn clone_branch<P: AsRef<Path>>(parent_dir: P, clone_url: &str, branch: &str) -> Result<()> {
    run_git(parent_dir, &["clone", "-b", branch, "--single-branch", clone_url])?;
    Ok(())
}
