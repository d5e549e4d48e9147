//! Push and pull-request delivery for the created branches.
//!
//! Both loops are fail-soft: a failure on one branch is collected and
//! reported, and the remaining branches are still attempted.

use crate::domain::{FeatureBranch, FeatureName};
use crate::error::{GitPromoteError, Result};
use crate::git::Repository;
use crate::hosting::{HostingService, PullRequestSpec};

/// Outcome of pushing the branch set.
#[derive(Debug, Default)]
pub struct PushReport {
    pub pushed: Vec<String>,
    pub failed: Vec<(String, GitPromoteError)>,
}

impl PushReport {
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of the pull-request pass.
#[derive(Debug, Default)]
pub struct PrReport {
    /// (branch, PR url) pairs.
    pub created: Vec<(String, String)>,
    pub failed: Vec<(String, GitPromoteError)>,
}

impl PrReport {
    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Checkout and push each eligible branch sequentially.
///
/// A rejected push is recorded and the loop moves on; the fail list comes
/// back in the report.
pub fn push_all(repo: &dyn Repository, branches: &[FeatureBranch]) -> Result<PushReport> {
    let mut report = PushReport::default();

    for branch in branches.iter().filter(|b| b.is_eligible()) {
        match repo
            .checkout(&branch.name)
            .and_then(|_| repo.push(&branch.name))
        {
            Ok(()) => report.pushed.push(branch.name.clone()),
            Err(e) => report.failed.push((branch.name.clone(), e)),
        }
    }

    Ok(report)
}

/// Build the tier-qualified PR title: `[PREFIX] <title>`.
///
/// `title` is the caller override when given, the feature name otherwise.
fn pr_title(branch: &FeatureBranch, feature: &FeatureName, title: Option<&str>) -> String {
    format!(
        "[{}] {}",
        branch.tier.prefix(),
        title.unwrap_or(feature.as_str())
    )
}

/// Open one pull request per eligible branch against its base.
///
/// Requires an authenticated hosting session; without one the stage is
/// refused with `MissingHostingAuth` before any PR is attempted (the
/// caller degrades this to a warning). Per-branch failures do not stop
/// the loop.
pub fn create_all_prs(
    hosting: &dyn HostingService,
    branches: &[FeatureBranch],
    feature: &FeatureName,
    title: Option<&str>,
    body: &str,
) -> Result<PrReport> {
    if !hosting.is_authenticated() {
        return Err(GitPromoteError::MissingHostingAuth);
    }

    let mut report = PrReport::default();

    for branch in branches.iter().filter(|b| b.is_eligible()) {
        let spec = PullRequestSpec {
            head: branch.name.clone(),
            base: branch.base.clone(),
            title: pr_title(branch, feature, title),
            body: body.to_string(),
            label: Some(branch.tier.prefix().to_lowercase()),
        };

        match hosting.create_pull_request(&spec) {
            Ok(pr) => report.created.push((branch.name.clone(), pr.url)),
            Err(e) => report.failed.push((branch.name.clone(), e)),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::creator;
    use crate::git::MockRepository;
    use crate::hosting::MockHosting;
    use crate::planner;

    fn feature() -> FeatureName {
        FeatureName::parse("CDC-9-login").unwrap()
    }

    fn created_branches(repo: &MockRepository) -> Vec<FeatureBranch> {
        let planned = planner::plan(&feature(), &Config::default());
        creator::create_all(repo, planned, "develop").unwrap().branches
    }

    fn repo_with_all_bases() -> MockRepository {
        MockRepository::new("develop")
            .with_local_branch("qa")
            .with_local_branch("staging")
            .with_local_branch("main")
    }

    #[test]
    fn test_push_all_pushes_every_branch() {
        let repo = repo_with_all_bases();
        let branches = created_branches(&repo);

        let report = push_all(&repo, &branches).unwrap();
        assert!(report.all_ok());
        assert_eq!(report.pushed.len(), 4);
        assert_eq!(repo.pushed().len(), 4);
    }

    #[test]
    fn test_push_failure_does_not_stop_the_loop() {
        let repo = repo_with_all_bases().with_push_failure_on("QA_CDC-9-login");
        let branches = created_branches(&repo);

        let report = push_all(&repo, &branches).unwrap();
        assert_eq!(report.pushed.len(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "QA_CDC-9-login");
        // Branches after the failing one were still attempted
        assert!(report.pushed.contains(&"PROD_CDC-9-login".to_string()));
    }

    #[test]
    fn test_pr_titles_are_tier_qualified() {
        let repo = repo_with_all_bases();
        let branches = created_branches(&repo);
        let hosting = MockHosting::new(true);

        let report =
            create_all_prs(&hosting, &branches, &feature(), None, "Pull request body").unwrap();
        assert!(report.all_ok());
        assert_eq!(report.created.len(), 4);

        let titles: Vec<String> = hosting.created().iter().map(|s| s.title.clone()).collect();
        assert!(titles.contains(&"[DEV] CDC-9-login".to_string()));
        assert!(titles.contains(&"[PROD] CDC-9-login".to_string()));

        // Each PR targets its tier's base and carries the tier label
        for spec in hosting.created() {
            assert!(!spec.base.is_empty());
            assert!(spec.label.is_some());
        }
    }

    #[test]
    fn test_pr_title_override() {
        let repo = repo_with_all_bases();
        let branches = created_branches(&repo);
        let hosting = MockHosting::new(true);

        create_all_prs(&hosting, &branches, &feature(), Some("Add login"), "body").unwrap();
        let titles: Vec<String> = hosting.created().iter().map(|s| s.title.clone()).collect();
        assert!(titles.contains(&"[QA] Add login".to_string()));
    }

    #[test]
    fn test_missing_auth_refuses_the_stage() {
        let repo = repo_with_all_bases();
        let branches = created_branches(&repo);
        let hosting = MockHosting::new(false);

        let err = create_all_prs(&hosting, &branches, &feature(), None, "body").unwrap_err();
        assert!(matches!(err, GitPromoteError::MissingHostingAuth));
        assert!(hosting.created().is_empty());
    }

    #[test]
    fn test_pr_failure_is_per_branch() {
        let repo = repo_with_all_bases();
        let branches = created_branches(&repo);
        let hosting = MockHosting::new(true).with_failure_for("STG_CDC-9-login");

        let report = create_all_prs(&hosting, &branches, &feature(), None, "body").unwrap();
        assert_eq!(report.created.len(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "STG_CDC-9-login");
    }

    #[test]
    fn test_skipped_branches_get_no_push_or_pr() {
        // qa base missing -> QA tier skipped
        let repo = MockRepository::new("develop")
            .with_local_branch("staging")
            .with_local_branch("main");
        let branches = created_branches(&repo);
        let hosting = MockHosting::new(true);

        let push = push_all(&repo, &branches).unwrap();
        assert_eq!(push.pushed.len(), 3);

        let prs = create_all_prs(&hosting, &branches, &feature(), None, "body").unwrap();
        assert_eq!(prs.created.len(), 3);
        assert!(hosting
            .created()
            .iter()
            .all(|s| s.head != "QA_CDC-9-login"));
    }
}
