//! `prsync apply-patch`: turn a pull request into a local commit.
//!
//! Fetches the PR metadata, downloads the patch next to the working copy,
//! switches onto the destination branch, creates a `pr-N` branch, applies the
//! patch, and commits the result.

use crate::api::{BitbucketClient, PullRequestApi};
use crate::cli::ApplyPatchArgs;
use crate::config::{Credentials, patch_file_name, resolve_patch_path};
use crate::error::Result;
use crate::repo::{GitRepo, RepoOps};
use crate::sync::{create_and_checkout, switch_to_branch};
use std::path::{Path, PathBuf};

pub fn cmd_apply_patch(args: ApplyPatchArgs) -> Result<()> {
    let api = BitbucketClient::with_base_url(
        &args.api.api_url,
        Credentials {
            username: args.api.username,
            password: args.api.password,
        },
    );
    let repo = GitRepo::new(&args.project_root);

    let patch_path = run(
        &api,
        &repo,
        &args.slug,
        &args.pr_number,
        args.patch_dir.as_deref(),
        &args.project_root,
    )?;
    println!("applied and committed patch {}", patch_path.display());
    Ok(())
}

/// Integration branch name for a pull request.
fn integration_branch(pr_number: &str) -> String {
    format!("pr-{}", pr_number)
}

/// The apply-patch sequence, fail-fast at every step.
///
/// The metadata fetch comes first: a non-200 there aborts the run before the
/// patch download is even attempted. Returns the path the patch was saved to.
fn run<A: PullRequestApi, R: RepoOps>(
    api: &A,
    repo: &R,
    slug: &str,
    pr_number: &str,
    patch_dir: Option<&Path>,
    project_root: &Path,
) -> Result<PathBuf> {
    let pr = api.fetch_pull_request(slug, pr_number)?;
    println!(
        "pull request {}: <{}> -> <{}>",
        pr.number, pr.source_branch, pr.destination_branch
    );

    let patch_path = resolve_patch_path(patch_dir, project_root, &patch_file_name(pr_number))?;
    api.download_patch(slug, pr_number, &patch_path)?;

    switch_to_branch(repo, &pr.destination_branch)?;
    create_and_checkout(repo, &integration_branch(pr_number))?;
    repo.apply_patch(&patch_path)?;
    repo.commit_all(&format!("pull request {}", pr_number))?;

    Ok(patch_path)
}
