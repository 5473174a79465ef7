//! `prsync merge-pr`: rehearse a pull-request merge on an integration branch.
//!
//! Fetches the PR metadata, switches onto the destination branch, creates a
//! `pr-N` branch, and merges the source branch into it. A conflict aborts the
//! run with the underlying git error.

use crate::api::{BitbucketClient, PullRequestApi};
use crate::cli::MergePrArgs;
use crate::config::Credentials;
use crate::error::Result;
use crate::repo::{GitRepo, RepoOps};
use crate::sync::{create_and_checkout, merge_into, switch_to_branch};

pub fn cmd_merge_pr(args: MergePrArgs) -> Result<()> {
    let api = BitbucketClient::with_base_url(
        &args.api.api_url,
        Credentials {
            username: args.api.username,
            password: args.api.password,
        },
    );
    let repo = GitRepo::new(&args.project_root);

    run(&api, &repo, &args.slug, &args.pr_number)
}

/// The merge sequence, fail-fast at every step.
fn run<A: PullRequestApi, R: RepoOps>(
    api: &A,
    repo: &R,
    slug: &str,
    pr_number: &str,
) -> Result<()> {
    let pr = api.fetch_pull_request(slug, pr_number)?;
    println!(
        "pull request {}: <{}> -> <{}>",
        pr.number, pr.source_branch, pr.destination_branch
    );

    switch_to_branch(repo, &pr.destination_branch)?;
    create_and_checkout(repo, &format!("pr-{}", pr_number))?;
    merge_into(repo, &pr.source_branch)
}
