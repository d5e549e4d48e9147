//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! operations the promotion workflow needs, allowing for multiple
//! implementations including real Git repositories and mock implementations
//! for testing.
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: the real implementation using the `git2`
//!   crate; it owns the working copy and current-branch pointer for the run
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Existence;
use crate::error::Result;
use git2::Oid;

/// Outcome of replaying one commit onto the current branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CherryPickOutcome {
    /// The commit applied cleanly; the new commit id on this branch.
    Applied(Oid),
    /// The resulting diff was empty - the change is already present here.
    AlreadyPresent,
    /// The commit could not be auto-applied. The repository is left in its
    /// conflicted state for manual resolution.
    Conflict,
}

/// Common git operation trait for the promotion workflow.
///
/// The working tree and current-branch pointer are a single shared resource;
/// implementations assume one logical operation at a time and callers hold
/// the repository value exclusively for the duration of a run.
///
/// All methods return [crate::error::Result], mapping backend errors to
/// [crate::error::GitPromoteError] variants.
pub trait Repository: Send + Sync {
    /// Where a branch ref currently exists.
    ///
    /// Local refs are checked by exact `refs/heads/<name>` lookup and the
    /// remote by its advertised head list, also by full ref name. Substring
    /// matches against unrelated branches are not possible.
    fn branch_existence(&self, name: &str) -> Result<Existence>;

    /// Shorthand name of the currently checked-out branch.
    fn current_branch(&self) -> Result<String>;

    /// Switch the working tree to an existing local branch.
    fn checkout(&self, name: &str) -> Result<()>;

    /// Make a branch available locally and check it out.
    ///
    /// An existing local branch is fast-forwarded from its remote
    /// counterpart when possible (diverged history is left untouched);
    /// a remote-only branch is checked out as a new tracking branch.
    /// Fails with `BaseUnavailable` when the ref exists nowhere.
    fn ensure_local(&self, name: &str) -> Result<()>;

    /// Create a new branch at the current HEAD and check it out.
    ///
    /// Fails with `BranchCollision` if the branch already exists; callers
    /// are expected to check existence first and treat a collision as
    /// recoverable.
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Whether the working tree or index has any pending changes.
    fn has_pending_changes(&self) -> Result<bool>;

    /// Commit pending changes with the given message and return the commit id.
    ///
    /// With a clean tree this records an empty marker commit (same tree as
    /// the parent) so that a propagation unit always exists. Callers report
    /// that case to the user; it is never silent.
    fn commit_pending(&self, message: &str) -> Result<Oid>;

    /// Replay the given commit onto the current branch.
    ///
    /// Keeps the original author and message. An empty resulting diff is
    /// success (`AlreadyPresent`); on `Conflict` the repository is left
    /// mid-cherry-pick for manual resolution.
    fn cherry_pick(&self, commit: Oid) -> Result<CherryPickOutcome>;

    /// Fetch one branch from the remote, updating its tracking ref.
    fn fetch_branch(&self, name: &str) -> Result<()>;

    /// Push a branch and set upstream tracking.
    ///
    /// Fails with `PushRejected` on non-fast-forward or auth failure.
    fn push(&self, name: &str) -> Result<()>;
}
