//! Branch synchronization routines.
//!
//! This is the one piece of logic shared by every prsync flow: put the working
//! copy on a target branch (skipping the checkout when it is already there),
//! create integration branches, and merge PR sources. Everything is generic
//! over [`RepoOps`] so the sequencing can be verified against a fake.

use crate::error::Result;
use crate::repo::RepoOps;

/// Branch every submodule is assumed to track.
///
/// If a submodule tracks something else, an additional lookup would be needed
/// to determine its branch name; none of the repositories this tool serves do.
const SUBMODULE_TRACKING_BRANCH: &str = "master";

/// Ensure the working copy is on `target`.
///
/// Compares the current branch name to `target`. If they match this is a
/// no-op (zero checkout invocations). Otherwise performs exactly one
/// submodule-propagating checkout followed by a full submodule refresh.
/// Fails if the target branch does not exist.
pub fn switch_to_branch<R: RepoOps>(repo: &R, target: &str) -> Result<()> {
    let current = repo.current_branch()?;
    if current == target {
        println!("already on branch <{}>", target);
        return Ok(());
    }

    println!("switching branch from <{}> to <{}>", current, target);
    repo.checkout(target)?;
    update_all_submodules(repo)
}

/// Check out the tracking branch in every submodule, then run a recursive
/// submodule initialization/update.
pub fn update_all_submodules<R: RepoOps>(repo: &R) -> Result<()> {
    repo.submodule_checkout_all(SUBMODULE_TRACKING_BRANCH)?;
    repo.submodule_update()
}

/// Create a new branch at the current HEAD and check it out.
///
/// Fails if `name` already exists.
pub fn create_and_checkout<R: RepoOps>(repo: &R, name: &str) -> Result<()> {
    println!("creating and checking out branch <{}>", name);
    repo.create_branch(name)
}

/// Merge `source` into the currently checked-out branch.
///
/// A merge conflict surfaces as the underlying git error.
pub fn merge_into<R: RepoOps>(repo: &R, source: &str) -> Result<()> {
    let current = repo.current_branch()?;
    println!("merging <{}> into <{}>", source, current);
    repo.merge(source)
}

/// Fetch a pull-request head from origin into a local `pr{number}` branch and
/// return the branch name.
///
/// Skipped when the working copy is already on that branch (a re-run against
/// an existing workspace): git refuses to fetch into the checked-out branch.
pub fn checkout_pr<R: RepoOps>(repo: &R, pr_number: &str) -> Result<String> {
    let branch = format!("pr{}", pr_number);
    if repo.current_branch()? == branch {
        println!("already on branch <{}>", branch);
        return Ok(branch);
    }
    println!("fetching pull request {} into branch <{}>", pr_number, branch);
    repo.fetch_pr_head(pr_number, &branch)?;
    Ok(branch)
}
