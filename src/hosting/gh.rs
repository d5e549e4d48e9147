use std::process::{Command, Stdio};

use crate::error::{GitPromoteError, Result};
use crate::hosting::{CreatedPr, HostingService, PullRequestSpec};

/// Hosting gateway backed by the GitHub CLI.
///
/// Every call shells out to `gh`; authentication comes from the user's
/// existing `gh auth login` session.
#[derive(Debug, Default)]
pub struct GhCli;

impl GhCli {
    pub fn new() -> Self {
        GhCli
    }
}

impl HostingService for GhCli {
    fn is_authenticated(&self) -> bool {
        Command::new("gh")
            .args(["auth", "status"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn create_pull_request(&self, spec: &PullRequestSpec) -> Result<CreatedPr> {
        let mut args = vec![
            "pr",
            "create",
            "--base",
            spec.base.as_str(),
            "--head",
            spec.head.as_str(),
            "--title",
            spec.title.as_str(),
            "--body",
            spec.body.as_str(),
        ];
        if let Some(label) = &spec.label {
            args.push("--label");
            args.push(label.as_str());
        }

        let output = Command::new("gh").args(&args).output().map_err(|e| {
            GitPromoteError::pr_failed(&spec.head, format!("failed to execute gh: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitPromoteError::pr_failed(
                &spec.head,
                stderr.trim().to_string(),
            ));
        }

        // gh prints the new PR's URL on stdout
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(CreatedPr { url })
    }
}
