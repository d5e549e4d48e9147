use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::error::{GitPromoteError, Result};
use crate::hosting::{CreatedPr, HostingService, PullRequestSpec};

/// Mock hosting service recording the pull requests it was asked to open.
pub struct MockHosting {
    authenticated: bool,
    fail_for: Mutex<BTreeSet<String>>,
    created: Mutex<Vec<PullRequestSpec>>,
}

impl MockHosting {
    pub fn new(authenticated: bool) -> Self {
        MockHosting {
            authenticated,
            fail_for: Mutex::new(BTreeSet::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Script a failure for PRs whose head branch matches.
    pub fn with_failure_for(self, head: impl Into<String>) -> Self {
        self.fail_for
            .lock()
            .expect("mock state lock poisoned")
            .insert(head.into());
        self
    }

    pub fn created(&self) -> Vec<PullRequestSpec> {
        self.created
            .lock()
            .expect("mock state lock poisoned")
            .clone()
    }
}

impl HostingService for MockHosting {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn create_pull_request(&self, spec: &PullRequestSpec) -> Result<CreatedPr> {
        if self
            .fail_for
            .lock()
            .expect("mock state lock poisoned")
            .contains(&spec.head)
        {
            return Err(GitPromoteError::pr_failed(&spec.head, "scripted failure"));
        }

        self.created
            .lock()
            .expect("mock state lock poisoned")
            .push(spec.clone());

        Ok(CreatedPr {
            url: format!("https://example.invalid/pr/{}", spec.head),
        })
    }
}
