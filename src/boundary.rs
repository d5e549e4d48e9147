use std::fmt;

/// Warnings for conditions at the edge of the workflow that are worth
/// telling the user about but do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The working tree was clean, so an empty marker commit was recorded
    /// as the propagation unit.
    NoPendingChanges { branch: String },
    /// A tier's base branch is missing, the tier branch was skipped.
    BaseBranchMissing { branch: String, base: String },
    /// PR creation was requested without a body, the default was used.
    DefaultPrBody { feature: String },
    /// The hosting CLI session is not authenticated, PR stage disabled.
    HostingUnauthenticated,
    /// The working copy could not be returned to the designated branch.
    ReturnBranchUnavailable { branch: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPendingChanges { branch } => {
                write!(
                    f,
                    "No pending changes on '{}'; recorded an empty marker commit to propagate",
                    branch
                )
            }
            BoundaryWarning::BaseBranchMissing { branch, base } => {
                write!(
                    f,
                    "Base branch '{}' not found locally or on the remote; skipping '{}'",
                    base, branch
                )
            }
            BoundaryWarning::DefaultPrBody { feature } => {
                write!(
                    f,
                    "No PR body given; using default \"Pull request for {}\"",
                    feature
                )
            }
            BoundaryWarning::HostingUnauthenticated => {
                write!(
                    f,
                    "Hosting CLI is not authenticated (try 'gh auth login'); skipping pull requests"
                )
            }
            BoundaryWarning::ReturnBranchUnavailable { branch } => {
                write!(f, "Could not return the working copy to '{}'", branch)
            }
        }
    }
}
