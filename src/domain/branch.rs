use super::{FeatureName, Tier};

/// Where a branch ref currently exists.
///
/// Returned as data from existence probes instead of a boolean
/// success/failure, so callers can distinguish a branch that only
/// lives on the remote from one that is absent everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Absent,
    Local,
    Remote,
    Both,
}

impl Existence {
    /// True if the ref exists anywhere (locally or on the remote).
    pub fn is_present(self) -> bool {
        !matches!(self, Existence::Absent)
    }
}

/// What the Branch Creator decided for a tier branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationOutcome {
    /// The branch was created in this run.
    Created,
    /// The branch already existed locally or on the remote.
    PreExisting,
    /// The tier's base branch was missing, so no branch was created.
    SkippedNoBase,
}

/// One tier branch of a feature, carried through every workflow stage.
///
/// The owning tier is recorded here at planning time and never re-derived
/// from the branch name downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureBranch {
    /// Full branch name, `{PREFIX}_{feature}`.
    pub name: String,
    pub tier: Tier,
    /// Base branch the tier branch forks from and targets in PRs.
    pub base: String,
    pub existence: Existence,
    /// None until the Branch Creator has processed the branch.
    pub outcome: Option<CreationOutcome>,
}

impl FeatureBranch {
    /// A planned branch that has not been checked against the repository yet.
    pub fn planned(tier: Tier, feature: &FeatureName, base: impl Into<String>) -> Self {
        FeatureBranch {
            name: format!("{}_{}", tier.prefix(), feature),
            tier,
            base: base.into(),
            existence: Existence::Absent,
            outcome: None,
        }
    }

    /// Whether downstream stages (propagation, push, PR) should touch this
    /// branch. Branches skipped for a missing base are out of the run.
    pub fn is_eligible(&self) -> bool {
        !matches!(self.outcome, Some(CreationOutcome::SkippedNoBase))
    }
}
