//! Exit code constants for the prsync CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state, local I/O)
//! - 2: API failure (non-200 response or transport error)
//! - 3: Git operation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing configuration, or local I/O failure.
pub const USER_ERROR: i32 = 1;

/// API failure: the PR-metadata service returned non-200 or was unreachable.
pub const API_FAILURE: i32 = 2;

/// Git operation failure: checkout, branch creation, merge, apply, or commit errors.
pub const GIT_FAILURE: i32 = 3;
