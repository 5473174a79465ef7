//! `prsync checkout-pr`: prepare a per-build workspace on the right branch.
//!
//! PR builds get a full clone plus a fetched `pull/N/head` branch; branch
//! builds get a single-branch clone. Re-runs against an existing workspace
//! skip the clone and just synchronize the branch.

use crate::cli::CheckoutPrArgs;
use crate::config::pr_number_from_url;
use crate::error::Result;
use crate::repo::{GitRepo, clone_branch, clone_repo};
use crate::sync::{checkout_pr, switch_to_branch};
use std::path::{Path, PathBuf};

pub fn cmd_checkout_pr(args: CheckoutPrArgs) -> Result<()> {
    let pr_number = pr_number_from_url(&args.pr_url);
    let workspace = workspace_dir(
        &args.work_path,
        &args.owner,
        &args.repo,
        pr_number.as_deref(),
        &args.branch,
    );
    std::fs::create_dir_all(&workspace)?;

    let project_root = workspace.join(&args.repo);
    if !project_root.is_dir() {
        match &pr_number {
            // A PR head can only be fetched after a full clone.
            Some(_) => clone_repo(&workspace, &args.clone_url)?,
            None => clone_branch(&workspace, &args.clone_url, &args.branch)?,
        }
    }

    let repo = GitRepo::new(&project_root);
    match &pr_number {
        Some(number) => {
            let pr_branch = checkout_pr(&repo, number)?;
            switch_to_branch(&repo, &pr_branch)?;
        }
        None => switch_to_branch(&repo, &args.branch)?,
    }

    println!("{}", project_root.display());
    Ok(())
}

/// Per-build workspace directory: `{work}/{owner}/{repo}/{prN | branch}`.
///
/// Keyed by PR number for PR builds and by branch name otherwise, so
/// concurrent builds of different PRs never share a working copy.
fn workspace_dir(
    work_path: &Path,
    owner: &str,
    repo: &str,
    pr_number: Option<&str>,
    branch: &str,
) -> PathBuf {
    let key = match pr_number {
        Some(number) => format!("pr{}", number),
        None => branch.to_string(),
    };
    work_path.join(owner).join(repo).join(key)
}
