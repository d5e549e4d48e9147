use thiserror::Error;

/// Unified error type for git-promote operations
#[derive(Error, Debug)]
pub enum GitPromoteError {
    #[error("Invalid feature name '{name}': {reason}")]
    InvalidFeatureName { name: String, reason: String },

    #[error("Not in a git repository: {0}")]
    NotARepository(String),

    #[error("No remote named '{0}' is configured")]
    NoRemote(String),

    #[error("Base branch '{0}' exists neither locally nor on the remote")]
    BaseUnavailable(String),

    #[error("Branch '{0}' already exists")]
    BranchCollision(String),

    #[error("Push of branch '{branch}' was rejected: {reason}")]
    PushRejected { branch: String, reason: String },

    #[error("Cherry-pick of {commit} onto '{branch}' stopped with conflicts")]
    CherryPickConflict { commit: String, branch: String },

    #[error("Pull request creation failed for '{branch}': {reason}")]
    PrCreationFailed { branch: String, reason: String },

    #[error("Not authenticated with the hosting service CLI")]
    MissingHostingAuth,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-promote
pub type Result<T> = std::result::Result<T, GitPromoteError>;

impl GitPromoteError {
    /// Create an invalid-feature-name error with context
    pub fn invalid_feature(name: impl Into<String>, reason: impl Into<String>) -> Self {
        GitPromoteError::InvalidFeatureName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a push-rejected error with context
    pub fn push_rejected(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        GitPromoteError::PushRejected {
            branch: branch.into(),
            reason: reason.into(),
        }
    }

    /// Create a PR-creation error with context
    pub fn pr_failed(branch: impl Into<String>, reason: impl Into<String>) -> Self {
        GitPromoteError::PrCreationFailed {
            branch: branch.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitPromoteError::invalid_feature("", "feature name is empty");
        assert_eq!(
            err.to_string(),
            "Invalid feature name '': feature name is empty"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitPromoteError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(GitPromoteError::push_rejected("DEV_x", "non-fast-forward")
            .to_string()
            .contains("DEV_x"));
        assert!(GitPromoteError::pr_failed("QA_x", "network")
            .to_string()
            .contains("QA_x"));
    }

    #[test]
    fn test_error_all_variants_have_messages() {
        let errors = vec![
            GitPromoteError::invalid_feature("x y", "contains whitespace"),
            GitPromoteError::NotARepository("no .git found".to_string()),
            GitPromoteError::NoRemote("origin".to_string()),
            GitPromoteError::BaseUnavailable("staging".to_string()),
            GitPromoteError::BranchCollision("DEV_login".to_string()),
            GitPromoteError::push_rejected("QA_login", "auth"),
            GitPromoteError::CherryPickConflict {
                commit: "abc1234".to_string(),
                branch: "STG_login".to_string(),
            },
            GitPromoteError::pr_failed("PROD_login", "duplicate PR"),
            GitPromoteError::MissingHostingAuth,
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_conflict_error_names_commit_and_branch() {
        let err = GitPromoteError::CherryPickConflict {
            commit: "deadbeef".to_string(),
            branch: "QA_CDC-9-login".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("deadbeef"));
        assert!(msg.contains("QA_CDC-9-login"));
    }
}
