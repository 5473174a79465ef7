//! Command implementations for prsync.
//!
//! Each command is a single linear sequence: any failing step aborts the rest
//! of the run. The command modules wire the real `BitbucketClient` and
//! `GitRepo` into flow functions that are generic over the two seams, so the
//! sequencing itself is unit-tested with fakes.

mod apply_patch;
mod checkout_pr;
mod merge_pr;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::ApplyPatch(args) => apply_patch::cmd_apply_patch(args),
        Command::CheckoutPr(args) => checkout_pr::cmd_checkout_pr(args),
        Command::MergePr(args) => merge_pr::cmd_merge_pr(args),
    }
}
