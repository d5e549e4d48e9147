//! Propagation engine: commit once, replay everywhere.
//!
//! One commit is recorded on the highest-rank tier branch and then
//! cherry-picked onto every other tier in promotion order. The engine is
//! single-pass and fail-stop: the first unresolved conflict halts the run,
//! because continuing would spread an incomplete change set, and conflict
//! resolution needs human judgment.

use git2::Oid;

use crate::domain::FeatureBranch;
use crate::error::{GitPromoteError, Result};
use crate::git::{CherryPickOutcome, Repository};

/// One cherry-pick attempt in promotion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationStep {
    pub branch: String,
    pub outcome: CherryPickOutcome,
}

/// What a propagation run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationReport {
    /// Branch the change was committed on.
    pub source_branch: String,
    /// The single commit replayed onto every other tier.
    pub source_commit: Oid,
    /// True when the working tree was clean and an empty marker commit
    /// was recorded instead.
    pub marker_commit: bool,
    /// Cherry-pick attempts, in promotion order. Ends at the conflicting
    /// branch when the run halted.
    pub steps: Vec<PropagationStep>,
    /// Branch whose conflict halted the run, if any. Branches of lower
    /// rank were not touched.
    pub halted_on: Option<String>,
}

impl PropagationReport {
    pub fn is_complete(&self) -> bool {
        self.halted_on.is_none()
    }

    /// The halt as a distinguished error, for callers that stop the
    /// remaining stages on conflict.
    pub fn into_result(self) -> Result<PropagationReport> {
        match &self.halted_on {
            Some(branch) => Err(GitPromoteError::CherryPickConflict {
                commit: self.source_commit.to_string(),
                branch: branch.clone(),
            }),
            None => Ok(self),
        }
    }
}

/// Commit the pending change on the source branch and cherry-pick it onto
/// each remaining eligible branch in promotion (rank-ascending) order.
///
/// The source is always the highest-rank eligible branch of the feature,
/// never whatever happens to be checked out. On a conflict the repository
/// is left mid-cherry-pick on the conflicting branch and no lower-rank
/// branch is touched; on success the working copy is returned to the
/// source branch.
pub fn propagate(
    repo: &dyn Repository,
    branches: &[FeatureBranch],
    message: &str,
) -> Result<PropagationReport> {
    let mut ordered: Vec<&FeatureBranch> = branches.iter().filter(|b| b.is_eligible()).collect();
    ordered.sort_by_key(|b| b.tier.rank());

    let (source, rest) = ordered
        .split_first()
        .ok_or_else(|| GitPromoteError::BaseUnavailable("no eligible tier branch".to_string()))?;

    repo.ensure_local(&source.name)?;
    let marker_commit = !repo.has_pending_changes()?;
    let source_commit = repo.commit_pending(message)?;

    let mut steps = Vec::with_capacity(rest.len());
    let mut halted_on = None;

    for branch in rest {
        repo.ensure_local(&branch.name)?;

        let outcome = repo.cherry_pick(source_commit)?;
        steps.push(PropagationStep {
            branch: branch.name.clone(),
            outcome,
        });

        if outcome == CherryPickOutcome::Conflict {
            halted_on = Some(branch.name.clone());
            break;
        }
    }

    if halted_on.is_none() {
        repo.checkout(&source.name)?;
    }

    Ok(PropagationReport {
        source_branch: source.name.clone(),
        source_commit,
        marker_commit,
        steps,
        halted_on,
    })
}
