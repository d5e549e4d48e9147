//! Main workflow orchestration logic
//!
//! Sequences the promotion stages - plan, create, propagate, push, open
//! pull requests - over the branch list, with each stage independently
//! skippable. This provides a clean separation between CLI argument
//! parsing and business logic; the workflow can be called
//! programmatically without depending on clap.

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::creator;
use crate::delivery::{self, PrReport, PushReport};
use crate::domain::{FeatureBranch, FeatureName};
use crate::error::{GitPromoteError, Result};
use crate::git::Repository;
use crate::hosting::HostingService;
use crate::planner;
use crate::propagation::{self, PropagationReport};
use crate::ui::{self, Confirmation};

/// Arguments for the promotion workflow.
///
/// Mirrors the CLI flags but in a format suitable for orchestration logic.
/// Propagation is requested by supplying its commit message, so a
/// propagation run without a message is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteWorkflowArgs {
    /// Raw feature name; validated before any repository access.
    pub feature: String,

    /// Only create branches, skip every later stage.
    pub create_only: bool,

    /// Push the branch set to the remote.
    pub push: bool,

    /// Commit message for the propagated change; `Some` enables the
    /// propagation stage.
    pub apply_message: Option<String>,

    /// PR title; `Some` enables the pull-request stage (implies push).
    pub pr_title: Option<String>,

    /// PR body; defaulted (with a warning) when PRs are enabled without one.
    pub pr_body: Option<String>,
}

/// What a workflow run did, stage by stage. Skipped stages stay `None`.
#[derive(Debug, Default)]
pub struct WorkflowResult {
    pub branches: Vec<FeatureBranch>,
    pub propagation: Option<PropagationReport>,
    pub push: Option<PushReport>,
    pub prs: Option<PrReport>,
    /// The user declined the uncommitted-changes confirmation.
    pub cancelled: bool,
}

/// Run the promotion workflow.
///
/// Stage order: plan, create, propagate (optional), push (optional), PRs
/// (optional). Structural errors abort before any mutation; a cherry-pick
/// conflict halts propagation and stops the remaining stages; per-branch
/// push/PR failures are collected and reported without stopping their
/// loops; missing hosting authentication disables only the PR stage.
pub fn run_promote_workflow(
    args: &PromoteWorkflowArgs,
    config: &Config,
    repo: &dyn Repository,
    hosting: &dyn HostingService,
    confirmation: &dyn Confirmation,
) -> Result<WorkflowResult> {
    let feature = FeatureName::parse(&args.feature)?;
    let planned = planner::plan(&feature, config);

    let mut result = WorkflowResult::default();

    // Without propagation the pending changes are never committed; they
    // would silently ride along through every checkout below.
    if args.apply_message.is_none() && repo.has_pending_changes()? {
        let keep_going = confirmation.confirm(
            "You have uncommitted changes; they will follow the working copy \
             across branch checkouts. Continue?",
        )?;
        if !keep_going {
            println!("Operation cancelled by user.");
            result.cancelled = true;
            return Ok(result);
        }
    }

    ui::display_status(&format!("Preparing tier branches for '{}'", feature));
    let summary = creator::create_all(repo, planned, &config.return_branch)?;
    ui::display_creation_summary(&summary.branches);
    for warning in &summary.warnings {
        ui::display_boundary_warning(warning);
    }
    result.branches = summary.branches;

    if args.create_only {
        ui::display_status("Create-only mode: skipping propagation, push and pull requests");
        return Ok(result);
    }

    let any_eligible = result.branches.iter().any(|b| b.is_eligible());

    if let Some(message) = &args.apply_message {
        if !any_eligible {
            ui::display_status("No eligible tier branches; nothing to propagate");
        } else {
            let report = propagation::propagate(repo, &result.branches, message)?;
            if report.marker_commit {
                ui::display_boundary_warning(&BoundaryWarning::NoPendingChanges {
                    branch: report.source_branch.clone(),
                });
            }
            ui::display_propagation_report(&report);

            if let Some(branch) = &report.halted_on {
                ui::display_conflict_instructions(&report.source_commit.to_string(), branch);
            }
            // A halt is a distinguished failure; push/PR must not run for
            // branches the change never reached.
            result.propagation = Some(report.into_result()?);
        }
    }

    if args.push || args.pr_title.is_some() {
        let report = delivery::push_all(repo, &result.branches)?;
        ui::display_push_report(&report);
        result.push = Some(report);
    }

    if args.pr_title.is_some() {
        let body = match &args.pr_body {
            Some(body) => body.clone(),
            None => {
                ui::display_boundary_warning(&BoundaryWarning::DefaultPrBody {
                    feature: feature.to_string(),
                });
                format!("Pull request for {}", feature)
            }
        };

        match delivery::create_all_prs(
            hosting,
            &result.branches,
            &feature,
            args.pr_title.as_deref(),
            &body,
        ) {
            Ok(report) => {
                ui::display_pr_report(&report);
                result.prs = Some(report);
            }
            Err(GitPromoteError::MissingHostingAuth) => {
                ui::display_boundary_warning(&BoundaryWarning::HostingUnauthenticated);
            }
            Err(e) => return Err(e),
        }
    }

    // Park the working copy back on the designated branch
    let _ = repo.checkout(&config.return_branch);

    Ok(result)
}
