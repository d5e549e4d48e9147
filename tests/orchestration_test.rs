//! End-to-end workflow scenarios over the mock gateways.

use git_promote::cli::orchestration::{run_promote_workflow, PromoteWorkflowArgs};
use git_promote::config::Config;
use git_promote::error::GitPromoteError;
use git_promote::git::MockRepository;
use git_promote::hosting::MockHosting;
use git_promote::ui::PresetConfirmation;

fn repo_with_all_bases() -> MockRepository {
    MockRepository::new("develop")
        .with_local_branch("qa")
        .with_local_branch("staging")
        .with_local_branch("main")
}

fn args(feature: &str) -> PromoteWorkflowArgs {
    PromoteWorkflowArgs {
        feature: feature.to_string(),
        create_only: false,
        push: false,
        apply_message: None,
        pr_title: None,
        pr_body: None,
    }
}

#[test]
fn test_create_only_run_touches_nothing_downstream() {
    let repo = repo_with_all_bases();
    let hosting = MockHosting::new(true);
    let workflow_args = PromoteWorkflowArgs {
        create_only: true,
        push: true,
        pr_title: Some("Add X".to_string()),
        ..args("CDC-9-login")
    };

    let result = run_promote_workflow(
        &workflow_args,
        &Config::default(),
        &repo,
        &hosting,
        &PresetConfirmation(true),
    )
    .unwrap();

    assert_eq!(result.branches.len(), 4);
    assert!(result.propagation.is_none());
    assert!(result.push.is_none());
    assert!(result.prs.is_none());
    assert!(repo.pushed().is_empty());
    assert!(hosting.created().is_empty());
}

#[test]
fn test_marker_commit_propagates_across_all_tiers() {
    // All four bases exist, -a -m with a clean working tree: the engine
    // synthesizes a marker change, commits once on PROD and cherry-picks
    // in order onto STG, QA, DEV.
    let repo = repo_with_all_bases();
    let hosting = MockHosting::new(true);
    let workflow_args = PromoteWorkflowArgs {
        apply_message: Some("add login".to_string()),
        ..args("CDC-9-login")
    };

    let result = run_promote_workflow(
        &workflow_args,
        &Config::default(),
        &repo,
        &hosting,
        &PresetConfirmation(true),
    )
    .unwrap();

    let report = result.propagation.unwrap();
    assert!(report.marker_commit);
    assert!(report.is_complete());
    assert_eq!(report.source_branch, "PROD_CDC-9-login");
    assert_eq!(repo.commits_on("PROD_CDC-9-login").len(), 1);

    let picks = repo.cherry_picks();
    let targets: Vec<&str> = picks.iter().map(|(b, _)| b.as_str()).collect();
    assert_eq!(
        targets,
        vec!["STG_CDC-9-login", "QA_CDC-9-login", "DEV_CDC-9-login"]
    );
}

#[test]
fn test_conflict_halts_run_and_skips_push_and_prs() {
    let repo = repo_with_all_bases()
        .with_pending_changes()
        .with_conflict_on("QA_CDC-9-login");
    let hosting = MockHosting::new(true);
    let workflow_args = PromoteWorkflowArgs {
        push: true,
        apply_message: Some("add login".to_string()),
        pr_title: Some("Add login".to_string()),
        ..args("CDC-9-login")
    };

    let err = run_promote_workflow(
        &workflow_args,
        &Config::default(),
        &repo,
        &hosting,
        &PresetConfirmation(true),
    )
    .unwrap_err();

    match err {
        GitPromoteError::CherryPickConflict { branch, .. } => {
            assert_eq!(branch, "QA_CDC-9-login");
        }
        other => panic!("expected CherryPickConflict, got {}", other),
    }

    // PROD committed, STG cherry-picked, DEV untouched
    assert_eq!(repo.commits_on("PROD_CDC-9-login").len(), 1);
    assert_eq!(repo.commits_on("STG_CDC-9-login").len(), 1);
    assert!(repo.commits_on("DEV_CDC-9-login").is_empty());

    // Push and PR stages never ran
    assert!(repo.pushed().is_empty());
    assert!(hosting.created().is_empty());
}

#[test]
fn test_missing_hosting_auth_disables_only_the_pr_stage() {
    let repo = repo_with_all_bases();
    let hosting = MockHosting::new(false);
    let workflow_args = PromoteWorkflowArgs {
        pr_title: Some("Add X".to_string()),
        ..args("CDC-9-login")
    };

    let result = run_promote_workflow(
        &workflow_args,
        &Config::default(),
        &repo,
        &hosting,
        &PresetConfirmation(true),
    )
    .unwrap();

    // Zero pull requests, but branch creation and the implied push succeeded
    assert!(hosting.created().is_empty());
    assert!(result.prs.is_none());
    assert_eq!(result.push.unwrap().pushed.len(), 4);
}

#[test]
fn test_pr_run_creates_one_pr_per_tier_with_default_body() {
    let repo = repo_with_all_bases();
    let hosting = MockHosting::new(true);
    let workflow_args = PromoteWorkflowArgs {
        pr_title: Some("Add login".to_string()),
        ..args("CDC-9-login")
    };

    let result = run_promote_workflow(
        &workflow_args,
        &Config::default(),
        &repo,
        &hosting,
        &PresetConfirmation(true),
    )
    .unwrap();

    let prs = result.prs.unwrap();
    assert_eq!(prs.created.len(), 4);

    for spec in hosting.created() {
        assert!(spec.title.starts_with('['));
        assert!(spec.title.ends_with("Add login"));
        assert_eq!(spec.body, "Pull request for CDC-9-login");
    }
}

#[test]
fn test_declined_confirmation_cancels_before_any_mutation() {
    let repo = repo_with_all_bases().with_pending_changes();
    let hosting = MockHosting::new(true);

    let result = run_promote_workflow(
        &args("CDC-9-login"),
        &Config::default(),
        &repo,
        &hosting,
        &PresetConfirmation(false),
    )
    .unwrap();

    assert!(result.cancelled);
    assert!(result.branches.is_empty());
    assert!(!repo.has_local_branch("DEV_CDC-9-login"));
}

#[test]
fn test_invalid_feature_name_aborts_before_any_mutation() {
    let repo = repo_with_all_bases();
    let hosting = MockHosting::new(true);

    let err = run_promote_workflow(
        &args("bad name"),
        &Config::default(),
        &repo,
        &hosting,
        &PresetConfirmation(true),
    )
    .unwrap_err();

    assert!(matches!(err, GitPromoteError::InvalidFeatureName { .. }));
    assert!(repo.checkouts().is_empty());
}
