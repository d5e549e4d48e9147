//! Code-hosting abstraction layer
//!
//! Wraps pull-request creation against the hosting service behind the
//! [HostingService] trait. The real implementation, [gh::GhCli], shells out
//! to the `gh` CLI and relies on an authenticated session existing
//! out-of-band; [mock::MockHosting] is the test implementation.

pub mod gh;
pub mod mock;

pub use gh::GhCli;
pub use mock::MockHosting;

use crate::error::Result;

/// Pull request parameters, assembled just before the hosting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSpec {
    /// Branch the PR merges from.
    pub head: String,
    /// Branch the PR merges into.
    pub base: String,
    pub title: String,
    pub body: String,
    pub label: Option<String>,
}

/// A successfully opened pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPr {
    pub url: String,
}

/// Pull-request operations against the code-hosting service.
pub trait HostingService: Send + Sync {
    /// Whether an authenticated CLI/API session exists. The tool only
    /// checks authentication, it never establishes it.
    fn is_authenticated(&self) -> bool;

    /// Open a pull request. Fails with `PrCreationFailed` (duplicate PR,
    /// closed base branch, network error) without affecting other branches.
    fn create_pull_request(&self, spec: &PullRequestSpec) -> Result<CreatedPr>;
}
