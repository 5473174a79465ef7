//! CLI argument parsing for prsync.
//!
//! Uses clap derive macros for declarative argument definitions. Every value a
//! CI system provides through the environment has an `env` fallback here, so
//! interactive use and CI use share one code path; downstream code only ever
//! sees the parsed structs. Actual implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// prsync: sync a CI working copy onto pull-request branches.
///
/// Fetches pull-request metadata from a Bitbucket-style API and drives the
/// local working copy through checkout, branch creation, patch application,
/// and merge steps. Each subcommand is a single fail-fast sequence.
#[derive(Parser, Debug)]
#[command(name = "prsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for prsync.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a pull request as a patch and commit it onto a fresh branch.
    ///
    /// Fetches PR metadata, downloads the patch, switches to the destination
    /// branch, creates a `pr-N` branch, applies the patch, and commits.
    ApplyPatch(ApplyPatchArgs),

    /// Check out a pull-request head (or plain branch) in a per-build workspace.
    ///
    /// Clones the repository if needed, fetches `pull/N/head` for PR builds,
    /// and switches the working copy onto the resulting branch.
    CheckoutPr(CheckoutPrArgs),

    /// Merge a pull request's source branch into its destination on a fresh branch.
    ///
    /// Fetches PR metadata, switches to the destination branch, creates a
    /// `pr-N` integration branch, and merges the source branch into it.
    MergePr(MergePrArgs),
}

/// Credentials and endpoint shared by the API-backed commands.
#[derive(Parser, Debug)]
pub struct ApiArgs {
    /// Hosting service login.
    #[arg(long, env = "BB_LOGIN")]
    pub username: String,

    /// Hosting service password or app token.
    #[arg(long, env = "BB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// API root to talk to.
    #[arg(long, default_value = crate::api::DEFAULT_BASE_URL)]
    pub api_url: String,
}

/// Arguments for the `apply-patch` command.
#[derive(Parser, Debug)]
pub struct ApplyPatchArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Pull request number.
    #[arg(long, env = "TRAVIS_PULL_REQUEST")]
    pub pr_number: String,

    /// Repository slug, `owner_name/repo_name`.
    #[arg(long, env = "TRAVIS_PULL_REQUEST_SLUG")]
    pub slug: String,

    /// Path to the project directory containing the `.git` directory.
    #[arg(long, env = "TRAVIS_BUILD_DIR")]
    pub project_root: PathBuf,

    /// Directory the patch is saved to. Defaults to the parent of the
    /// project root when unset or missing on disk.
    #[arg(long)]
    pub patch_dir: Option<PathBuf>,
}

/// Arguments for the `checkout-pr` command.
#[derive(Parser, Debug)]
pub struct CheckoutPrArgs {
    /// URL usable with `git clone URL`.
    #[arg(long, env = "CIRCLE_REPOSITORY_URL")]
    pub clone_url: String,

    /// Repository owner name.
    #[arg(long, env = "CIRCLE_PROJECT_USERNAME")]
    pub owner: String,

    /// Repository name.
    #[arg(long, env = "CIRCLE_PROJECT_REPONAME")]
    pub repo: String,

    /// Pull request URL. A non-numeric or absent value means a branch build.
    #[arg(long, env = "CIRCLE_PULL_REQUEST", default_value = "")]
    pub pr_url: String,

    /// CI working directory the per-build workspace is created under.
    #[arg(long, env = "CIRCLE_WORKING_DIRECTORY")]
    pub work_path: PathBuf,

    /// Branch being built (used when there is no pull request).
    #[arg(long, env = "CIRCLE_BRANCH")]
    pub branch: String,
}

/// Arguments for the `merge-pr` command.
#[derive(Parser, Debug)]
pub struct MergePrArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Pull request number.
    #[arg(long, env = "TRAVIS_PULL_REQUEST")]
    pub pr_number: String,

    /// Repository slug, `owner_name/repo_name`.
    #[arg(long, env = "TRAVIS_PULL_REQUEST_SLUG")]
    pub slug: String,

    /// Path to the project directory containing the `.git` directory.
    #[arg(long, env = "TRAVIS_BUILD_DIR")]
    pub project_root: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
