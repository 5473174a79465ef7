//! Shared helpers for unit tests: throwaway git repositories and recording
//! fakes for the `RepoOps` and `PullRequestApi` seams.

use crate::api::{PullRequest, PullRequestApi};
use crate::error::{PrsyncError, Result};
use crate::repo::RepoOps;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub(crate) fn create_test_repo() -> TempDir {
    create_repo(false)
}

pub(crate) fn create_test_repo_with_remote() -> TempDir {
    create_repo(true)
}

fn create_repo(add_origin_remote: bool) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments: set HEAD to an
    // unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    if add_origin_remote {
        // Remote pointing at itself, so fetch has somewhere to go in tests.
        let path_str = path.to_string_lossy().to_string();
        git(path, &["remote", "add", "origin", &path_str]);
    }

    temp_dir
}

/// Write `content` to `name` and commit it.
pub(crate) fn commit_file(repo_dir: &Path, name: &str, content: &str) {
    std::fs::write(repo_dir.join(name), content).unwrap();
    git(repo_dir, &["add", "."]);
    git(repo_dir, &["commit", "-m", &format!("update {}", name)]);
}

/// Point `refs/pull/{number}/head` at the current HEAD, mimicking the ref
/// layout hosting services expose for pull requests.
pub(crate) fn create_pr_ref(repo_dir: &Path, number: &str) {
    git(
        repo_dir,
        &["update-ref", &format!("refs/pull/{}/head", number), "HEAD"],
    );
}

fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

/// Recorded repository calls, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RepoCall {
    Checkout(String),
    CreateBranch(String),
    Merge(String),
    SubmoduleUpdate,
    SubmoduleCheckoutAll(String),
    FetchPrHead(String, String),
    ApplyPatch(PathBuf),
    CommitAll(String),
}

/// Fake working copy that records calls instead of shelling out.
pub(crate) struct FakeRepo {
    pub(crate) branch: RefCell<String>,
    pub(crate) calls: RefCell<Vec<RepoCall>>,
    pub(crate) fail_checkout: bool,
    pub(crate) fail_merge: bool,
}

impl FakeRepo {
    pub(crate) fn on_branch(branch: &str) -> Self {
        Self {
            branch: RefCell::new(branch.to_string()),
            calls: RefCell::new(Vec::new()),
            fail_checkout: false,
            fail_merge: false,
        }
    }

    pub(crate) fn calls(&self) -> Vec<RepoCall> {
        self.calls.borrow().clone()
    }
}

impl RepoOps for FakeRepo {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.borrow().clone())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        if self.fail_checkout {
            return Err(PrsyncError::GitError(format!(
                "pathspec '{}' did not match any file(s) known to git",
                branch
            )));
        }
        self.calls
            .borrow_mut()
            .push(RepoCall::Checkout(branch.to_string()));
        *self.branch.borrow_mut() = branch.to_string();
        Ok(())
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(RepoCall::CreateBranch(branch.to_string()));
        *self.branch.borrow_mut() = branch.to_string();
        Ok(())
    }

    fn merge(&self, branch: &str) -> Result<()> {
        if self.fail_merge {
            return Err(PrsyncError::GitError(format!(
                "merge of '{}' produced conflicts",
                branch
            )));
        }
        self.calls
            .borrow_mut()
            .push(RepoCall::Merge(branch.to_string()));
        Ok(())
    }

    fn submodule_update(&self) -> Result<()> {
        self.calls.borrow_mut().push(RepoCall::SubmoduleUpdate);
        Ok(())
    }

    fn submodule_checkout_all(&self, branch: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(RepoCall::SubmoduleCheckoutAll(branch.to_string()));
        Ok(())
    }

    fn fetch_pr_head(&self, pr_number: &str, local_branch: &str) -> Result<()> {
        self.calls.borrow_mut().push(RepoCall::FetchPrHead(
            pr_number.to_string(),
            local_branch.to_string(),
        ));
        Ok(())
    }

    fn apply_patch(&self, patch: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(RepoCall::ApplyPatch(patch.to_path_buf()));
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(RepoCall::CommitAll(message.to_string()));
        Ok(())
    }
}

/// Recorded API calls, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ApiCall {
    FetchPullRequest(String, String),
    DownloadPatch(String, String, PathBuf),
}

/// Fake hosting service.
pub(crate) struct FakeApi {
    pub(crate) pull_request: Option<PullRequest>,
    pub(crate) calls: RefCell<Vec<ApiCall>>,
    /// HTTP status simulated for the metadata endpoint; anything but 200 fails.
    pub(crate) metadata_status: u16,
}

impl FakeApi {
    pub(crate) fn returning(pr: PullRequest) -> Self {
        Self {
            pull_request: Some(pr),
            calls: RefCell::new(Vec::new()),
            metadata_status: 200,
        }
    }

    pub(crate) fn failing_with_status(status: u16) -> Self {
        Self {
            pull_request: None,
            calls: RefCell::new(Vec::new()),
            metadata_status: status,
        }
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }
}

impl PullRequestApi for FakeApi {
    fn fetch_pull_request(&self, slug: &str, number: &str) -> Result<PullRequest> {
        self.calls.borrow_mut().push(ApiCall::FetchPullRequest(
            slug.to_string(),
            number.to_string(),
        ));
        if self.metadata_status != 200 {
            return Err(PrsyncError::ApiError(format!(
                "failed to retrieve pull request info: {}",
                self.metadata_status
            )));
        }
        self.pull_request
            .clone()
            .ok_or_else(|| PrsyncError::ApiError("no pull request configured".to_string()))
    }

    fn download_patch(&self, slug: &str, number: &str, dest: &Path) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::DownloadPatch(
            slug.to_string(),
            number.to_string(),
            dest.to_path_buf(),
        ));
        std::fs::write(dest, b"fake patch contents\n")?;
        Ok(())
    }
}
