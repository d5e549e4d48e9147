//! Branch creation: ensure each tier branch exists, recording outcomes.

use crate::boundary::BoundaryWarning;
use crate::domain::{CreationOutcome, Existence, FeatureBranch};
use crate::error::{GitPromoteError, Result};
use crate::git::Repository;

/// Result of a branch-creation pass.
#[derive(Debug)]
pub struct CreationSummary {
    /// All planned branches with their final existence and outcome.
    pub branches: Vec<FeatureBranch>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Process each planned branch in creation order.
///
/// Per branch: an existing tier branch is recorded as pre-existing, a
/// missing base skips the tier (without aborting the loop), otherwise the
/// base is made available locally and the tier branch is created on top of
/// it. Afterwards the working copy is returned to `return_branch` (best
/// effort).
///
/// Running this twice for the same feature never fails; the second pass
/// records every branch as pre-existing.
pub fn create_all(
    repo: &dyn Repository,
    planned: Vec<FeatureBranch>,
    return_branch: &str,
) -> Result<CreationSummary> {
    let mut branches = Vec::with_capacity(planned.len());
    let mut warnings = Vec::new();

    for mut branch in planned {
        let existence = repo.branch_existence(&branch.name)?;
        if existence.is_present() {
            branch.existence = existence;
            branch.outcome = Some(CreationOutcome::PreExisting);
            branches.push(branch);
            continue;
        }

        if !repo.branch_existence(&branch.base)?.is_present() {
            branch.outcome = Some(CreationOutcome::SkippedNoBase);
            warnings.push(BoundaryWarning::BaseBranchMissing {
                branch: branch.name.clone(),
                base: branch.base.clone(),
            });
            branches.push(branch);
            continue;
        }

        repo.ensure_local(&branch.base)?;
        match repo.create_branch(&branch.name) {
            Ok(()) => {
                branch.existence = Existence::Local;
                branch.outcome = Some(CreationOutcome::Created);
            }
            // Lost the race between the existence probe and creation;
            // same recoverable outcome as finding the branch up front.
            Err(GitPromoteError::BranchCollision(_)) => {
                branch.existence = repo.branch_existence(&branch.name)?;
                branch.outcome = Some(CreationOutcome::PreExisting);
            }
            Err(e) => return Err(e),
        }
        branches.push(branch);
    }

    if repo.checkout(return_branch).is_err() {
        warnings.push(BoundaryWarning::ReturnBranchUnavailable {
            branch: return_branch.to_string(),
        });
    }

    Ok(CreationSummary { branches, warnings })
}
