//! Run configuration helpers.
//!
//! CI context arrives through CLI flags with environment-variable fallbacks
//! (see `cli`). Everything downstream of argument parsing receives explicit
//! values; nothing in this crate reads the environment after startup.

use crate::error::{PrsyncError, Result};
use std::path::{Path, PathBuf};

/// Basic-auth credentials for the PR hosting service.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// File name the downloaded patch is stored under.
pub fn patch_file_name(pr_number: &str) -> String {
    format!("pr{}.patch", pr_number)
}

/// Resolve the full path the patch file is written to.
///
/// Uses `requested_dir` when it was given and exists on disk; otherwise falls
/// back to the parent of the project root, so the patch never lands inside
/// the working copy itself.
pub fn resolve_patch_path(
    requested_dir: Option<&Path>,
    project_root: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    if let Some(dir) = requested_dir
        && dir.is_dir()
    {
        return Ok(dir.join(file_name));
    }

    let parent = project_root.parent().ok_or_else(|| {
        PrsyncError::UserError(format!(
            "project root {} has no parent directory to store the patch in",
            project_root.display()
        ))
    })?;
    Ok(parent.join(file_name))
}

/// Extract the PR number from a pull-request URL.
///
/// Returns `None` when the last path segment is not numeric, which is how a
/// branch build (no associated PR) presents itself in CI.
pub fn pr_number_from_url(url: &str) -> Option<String> {
    let tail = url.trim_end_matches('/').rsplit('/').next()?;
    if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
        Some(tail.to_string())
    } else {
        None
    }
}
