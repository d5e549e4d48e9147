//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user
//! interaction. Functions here only print; they never prompt.

use crate::boundary::BoundaryWarning;
use crate::delivery::{PrReport, PushReport};
use crate::domain::{CreationOutcome, FeatureBranch};
use crate::git::CherryPickOutcome;
use crate::propagation::PropagationReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Format and print a per-item failure marker in red.
pub fn display_failure(message: &str) {
    println!("\x1b[31m✗\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Per-branch creation outcomes, one marker per tier.
pub fn display_creation_summary(branches: &[FeatureBranch]) {
    println!("\n\x1b[1mBranch creation:\x1b[0m");
    for branch in branches {
        match branch.outcome {
            Some(CreationOutcome::Created) => {
                display_success(&format!("{} (from '{}')", branch.name, branch.base));
            }
            Some(CreationOutcome::PreExisting) => {
                display_status(&format!("{} already exists", branch.name));
            }
            Some(CreationOutcome::SkippedNoBase) => {
                display_failure(&format!("{} skipped, base '{}' missing", branch.name, branch.base));
            }
            None => {}
        }
    }
}

/// Per-branch cherry-pick outcomes and the propagated commit.
pub fn display_propagation_report(report: &PropagationReport) {
    println!("\n\x1b[1mPropagation:\x1b[0m");
    let source_commit = report.source_commit.to_string();
    let commit = short_hash(&source_commit);
    display_success(&format!(
        "committed {} on {}",
        commit, report.source_branch
    ));

    for step in &report.steps {
        match step.outcome {
            CherryPickOutcome::Applied(_) => {
                display_success(&format!("{} <- cherry-pick {}", step.branch, commit));
            }
            CherryPickOutcome::AlreadyPresent => {
                display_status(&format!("{} already contains {}", step.branch, commit));
            }
            CherryPickOutcome::Conflict => {
                display_failure(&format!("{} conflicts on {}", step.branch, commit));
            }
        }
    }
}

/// Manual-resolution instructions shown when a cherry-pick halts the run.
pub fn display_conflict_instructions(commit: &str, branch: &str) {
    eprintln!(
        "\n\x1b[31mCherry-pick of {} onto '{}' stopped with conflicts.\x1b[0m",
        commit, branch
    );
    eprintln!("The repository was left on '{}' for manual resolution:", branch);
    eprintln!("  1. resolve the conflicted files, then \x1b[36mgit add -A\x1b[0m");
    eprintln!("  2. \x1b[36mgit cherry-pick --continue\x1b[0m");
    eprintln!("  or abandon this branch with \x1b[36mgit cherry-pick --abort\x1b[0m");
    eprintln!("Lower-rank branches were not touched.");
}

/// Push results, one marker per branch.
pub fn display_push_report(report: &PushReport) {
    println!("\n\x1b[1mPush:\x1b[0m");
    for branch in &report.pushed {
        display_success(&format!("pushed {}", branch));
    }
    for (branch, err) in &report.failed {
        display_failure(&format!("push failed for {}: {}", branch, err));
    }
}

/// PR results, one marker per branch.
pub fn display_pr_report(report: &PrReport) {
    println!("\n\x1b[1mPull requests:\x1b[0m");
    for (branch, url) in &report.created {
        display_success(&format!("{} -> {}", branch, url));
    }
    for (branch, err) in &report.failed {
        display_failure(&format!("PR failed for {}: {}", branch, err));
    }
}

fn short_hash(hash: &str) -> &str {
    if hash.len() > 7 {
        &hash[..7]
    } else {
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("abc1234def5678"), "abc1234");
        assert_eq!(short_hash("abc"), "abc");
    }
}
