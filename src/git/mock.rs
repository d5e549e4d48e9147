use crate::domain::Existence;
use crate::error::{GitPromoteError, Result};
use crate::git::{CherryPickOutcome, Repository};
use git2::Oid;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// In-memory repository state behind the mock.
#[derive(Debug, Default)]
struct State {
    local: BTreeSet<String>,
    remote: BTreeSet<String>,
    current: String,
    pending_changes: bool,
    /// Branches whose cherry-pick is scripted to conflict.
    conflict_on: BTreeSet<String>,
    /// Branches where the change is scripted as already present.
    present_on: BTreeSet<String>,
    push_failures: BTreeSet<String>,
    /// Commits recorded per branch, in order.
    commits: BTreeMap<String, Vec<Oid>>,
    /// (branch, source commit) pairs, in cherry-pick order.
    cherry_picks: Vec<(String, Oid)>,
    pushed: Vec<String>,
    checkouts: Vec<String>,
    next_commit: u8,
}

/// Mock repository for testing without actual git operations.
///
/// Branch existence, cherry-pick outcomes and push failures are scripted
/// up front; the mock records checkouts, commits, cherry-picks and pushes
/// for assertions.
pub struct MockRepository {
    state: Mutex<State>,
}

fn synthetic_oid(n: u8) -> Oid {
    Oid::from_bytes(&[n; 20]).expect("20 bytes always form a valid oid")
}

impl MockRepository {
    /// Create a mock repository checked out on `current`.
    pub fn new(current: impl Into<String>) -> Self {
        let current = current.into();
        let mut state = State {
            current: current.clone(),
            next_commit: 1,
            ..State::default()
        };
        state.local.insert(current);

        MockRepository {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("mock state lock poisoned")
    }

    pub fn with_local_branch(self, name: impl Into<String>) -> Self {
        self.lock().local.insert(name.into());
        self
    }

    pub fn with_remote_branch(self, name: impl Into<String>) -> Self {
        self.lock().remote.insert(name.into());
        self
    }

    pub fn with_pending_changes(self) -> Self {
        self.lock().pending_changes = true;
        self
    }

    /// Script a conflict for cherry-picks attempted on the given branch.
    pub fn with_conflict_on(self, branch: impl Into<String>) -> Self {
        self.lock().conflict_on.insert(branch.into());
        self
    }

    /// Script an empty-diff cherry-pick on the given branch.
    pub fn with_change_present_on(self, branch: impl Into<String>) -> Self {
        self.lock().present_on.insert(branch.into());
        self
    }

    pub fn with_push_failure_on(self, branch: impl Into<String>) -> Self {
        self.lock().push_failures.insert(branch.into());
        self
    }

    // Recorded activity, for assertions

    pub fn current(&self) -> String {
        self.lock().current.clone()
    }

    pub fn commits_on(&self, branch: &str) -> Vec<Oid> {
        self.lock().commits.get(branch).cloned().unwrap_or_default()
    }

    pub fn cherry_picks(&self) -> Vec<(String, Oid)> {
        self.lock().cherry_picks.clone()
    }

    pub fn pushed(&self) -> Vec<String> {
        self.lock().pushed.clone()
    }

    pub fn checkouts(&self) -> Vec<String> {
        self.lock().checkouts.clone()
    }

    pub fn has_local_branch(&self, name: &str) -> bool {
        self.lock().local.contains(name)
    }
}

impl Repository for MockRepository {
    fn branch_existence(&self, name: &str) -> Result<Existence> {
        let state = self.lock();
        Ok(
            match (state.local.contains(name), state.remote.contains(name)) {
                (true, true) => Existence::Both,
                (true, false) => Existence::Local,
                (false, true) => Existence::Remote,
                (false, false) => Existence::Absent,
            },
        )
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.lock().current.clone())
    }

    fn checkout(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        if !state.local.contains(name) {
            return Err(GitPromoteError::Git(git2::Error::from_str(&format!(
                "no local branch '{}'",
                name
            ))));
        }
        state.current = name.to_string();
        state.checkouts.push(name.to_string());
        Ok(())
    }

    fn ensure_local(&self, name: &str) -> Result<()> {
        {
            let mut state = self.lock();
            if !state.local.contains(name) {
                if !state.remote.contains(name) {
                    return Err(GitPromoteError::BaseUnavailable(name.to_string()));
                }
                state.local.insert(name.to_string());
            }
        }
        self.checkout(name)
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        {
            let mut state = self.lock();
            if state.local.contains(name) {
                return Err(GitPromoteError::BranchCollision(name.to_string()));
            }
            state.local.insert(name.to_string());
        }
        self.checkout(name)
    }

    fn has_pending_changes(&self) -> Result<bool> {
        Ok(self.lock().pending_changes)
    }

    fn commit_pending(&self, _message: &str) -> Result<Oid> {
        let mut state = self.lock();
        let oid = synthetic_oid(state.next_commit);
        state.next_commit += 1;
        state.pending_changes = false;

        let branch = state.current.clone();
        state.commits.entry(branch).or_default().push(oid);
        Ok(oid)
    }

    fn cherry_pick(&self, commit: Oid) -> Result<CherryPickOutcome> {
        let mut state = self.lock();
        let branch = state.current.clone();
        state.cherry_picks.push((branch.clone(), commit));

        if state.conflict_on.contains(&branch) {
            return Ok(CherryPickOutcome::Conflict);
        }
        if state.present_on.contains(&branch) {
            return Ok(CherryPickOutcome::AlreadyPresent);
        }

        let oid = synthetic_oid(state.next_commit);
        state.next_commit += 1;
        state.commits.entry(branch).or_default().push(oid);
        Ok(CherryPickOutcome::Applied(oid))
    }

    fn fetch_branch(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn push(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        if state.push_failures.contains(name) {
            return Err(GitPromoteError::push_rejected(name, "scripted failure"));
        }
        state.pushed.push(name.to_string());
        state.remote.insert(name.to_string());
        Ok(())
    }
}
