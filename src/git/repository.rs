use crate::domain::Existence;
use crate::error::{GitPromoteError, Result};
use crate::git::CherryPickOutcome;
use git2::{BranchType, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface.
///
/// Owns the working copy and current-branch pointer for the duration of a
/// run; all branch-switching operations go through this session object.
pub struct Git2Repository {
    repo: Git2Repo,
    remote: String,
}

impl Git2Repository {
    /// Open or discover a git repository, bound to the given remote name.
    pub fn open<P: AsRef<Path>>(path: P, remote: impl Into<String>) -> Result<Self> {
        let repo = Git2Repo::discover(path)
            .map_err(|e| GitPromoteError::NotARepository(e.message().to_string()))?;

        Ok(Git2Repository {
            repo,
            remote: remote.into(),
        })
    }

    /// Verify the configured remote exists in the repository.
    pub fn require_remote(&self) -> Result<()> {
        self.repo
            .find_remote(&self.remote)
            .map_err(|_| GitPromoteError::NoRemote(self.remote.clone()))?;
        Ok(())
    }

    /// Credentials callback chain: SSH keys from ~/.ssh, then the SSH agent,
    /// then whatever default helper git is configured with.
    fn credential_callbacks() -> git2::RemoteCallbacks<'static> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }

    fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.repo.head()?;
        Ok(head.peel_to_commit()?)
    }

    /// Ask the remote for its advertised heads and look for an exact
    /// `refs/heads/<name>` match.
    fn remote_has_branch(&self, name: &str) -> Result<bool> {
        let mut remote = self
            .repo
            .find_remote(&self.remote)
            .map_err(|_| GitPromoteError::NoRemote(self.remote.clone()))?;

        let callbacks = Self::credential_callbacks();
        let connection = remote.connect_auth(git2::Direction::Fetch, Some(callbacks), None)?;

        let wanted = format!("refs/heads/{}", name);
        let found = connection.list()?.iter().any(|head| head.name() == wanted);

        Ok(found)
    }

    /// Fast-forward a local branch from its remote tracking ref.
    ///
    /// Missing remote ref or diverged history both leave the local branch
    /// as it is; only a clean fast-forward moves the ref.
    fn fast_forward(&self, branch_name: &str) -> Result<()> {
        let tracking = format!("{}/{}", self.remote, branch_name);
        let remote_ref = match self
            .repo
            .find_reference(&format!("refs/remotes/{}", tracking))
        {
            Ok(r) => r,
            Err(_) => return Ok(()),
        };

        let remote_oid = match remote_ref.target() {
            Some(oid) => oid,
            None => return Ok(()),
        };

        let local_branch = match self.repo.find_branch(branch_name, BranchType::Local) {
            Ok(b) => b,
            Err(_) => {
                let remote_commit = self.repo.find_commit(remote_oid)?;
                self.repo.branch(branch_name, &remote_commit, false)?;
                return Ok(());
            }
        };

        let local_ref = local_branch.into_reference();
        let local_oid = match local_ref.target() {
            Some(oid) => oid,
            None => return Ok(()),
        };

        if local_oid == remote_oid {
            return Ok(());
        }

        if !self.repo.graph_descendant_of(remote_oid, local_oid)? {
            // Diverged; a fast-forward-only pull leaves the branch alone
            return Ok(());
        }

        let branch_ref_name = format!("refs/heads/{}", branch_name);
        let mut reference = self.repo.find_reference(&branch_ref_name)?;
        reference.set_target(remote_oid, &format!("fast-forward from {}", tracking))?;

        Ok(())
    }
}

impl super::Repository for Git2Repository {
    fn branch_existence(&self, name: &str) -> Result<Existence> {
        let local = self.repo.find_branch(name, BranchType::Local).is_ok();
        let remote = self.remote_has_branch(name)?;

        Ok(match (local, remote) {
            (true, true) => Existence::Both,
            (true, false) => Existence::Local,
            (false, true) => Existence::Remote,
            (false, false) => Existence::Absent,
        })
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    fn checkout(&self, name: &str) -> Result<()> {
        let ref_name = format!("refs/heads/{}", name);
        let object = self.repo.revparse_single(&ref_name)?;

        let mut checkout = git2::build::CheckoutBuilder::new();
        self.repo.checkout_tree(&object, Some(&mut checkout))?;
        self.repo.set_head(&ref_name)?;

        Ok(())
    }

    fn ensure_local(&self, name: &str) -> Result<()> {
        // Refresh the tracking ref so the fast-forward sees current state.
        // The branch may exist only locally, so a failed fetch is fine.
        let _ = self.fetch_branch(name);

        if self.repo.find_branch(name, BranchType::Local).is_ok() {
            self.fast_forward(name)?;
            return self.checkout(name);
        }

        let remote_ref = format!("refs/remotes/{}/{}", self.remote, name);
        match self.repo.find_reference(&remote_ref) {
            Ok(reference) => {
                let oid = reference
                    .target()
                    .ok_or_else(|| GitPromoteError::BaseUnavailable(name.to_string()))?;
                let commit = self.repo.find_commit(oid)?;
                let mut branch = self.repo.branch(name, &commit, false)?;
                branch.set_upstream(Some(&format!("{}/{}", self.remote, name)))?;
                self.checkout(name)
            }
            Err(_) => Err(GitPromoteError::BaseUnavailable(name.to_string())),
        }
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        if self.repo.find_branch(name, BranchType::Local).is_ok() {
            return Err(GitPromoteError::BranchCollision(name.to_string()));
        }

        let head = self.head_commit()?;
        self.repo.branch(name, &head, false).map_err(|e| {
            if e.code() == git2::ErrorCode::Exists {
                GitPromoteError::BranchCollision(name.to_string())
            } else {
                GitPromoteError::Git(e)
            }
        })?;

        self.checkout(name)
    }

    fn has_pending_changes(&self) -> Result<bool> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    fn commit_pending(&self, message: &str) -> Result<Oid> {
        let signature = self.repo.signature()?;
        let head = self.head_commit()?;

        let tree_id = if self.has_pending_changes()? {
            let mut index = self.repo.index()?;
            index.add_all(["*"], git2::IndexAddOption::DEFAULT, None)?;
            index.write()?;
            index.write_tree()?
        } else {
            // Clean tree: empty marker commit, same tree as the parent
            head.tree_id()
        };

        let tree = self.repo.find_tree(tree_id)?;
        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&head],
        )?;

        Ok(oid)
    }

    fn cherry_pick(&self, commit_id: Oid) -> Result<CherryPickOutcome> {
        let commit = self.repo.find_commit(commit_id)?;

        self.repo.cherrypick(&commit, None)?;

        let mut index = self.repo.index()?;
        if index.has_conflicts() {
            // Leave CHERRY_PICK_HEAD and the conflicted files in place
            return Ok(CherryPickOutcome::Conflict);
        }

        let tree_id = index.write_tree()?;
        let head = self.head_commit()?;

        if tree_id == head.tree_id() {
            self.repo.cleanup_state()?;
            return Ok(CherryPickOutcome::AlreadyPresent);
        }

        let tree = self.repo.find_tree(tree_id)?;
        let author = commit.author();
        let committer = self.repo.signature()?;
        let message = commit.message().unwrap_or("(empty message)");

        let new_oid = self
            .repo
            .commit(Some("HEAD"), &author, &committer, message, &tree, &[&head])?;
        self.repo.cleanup_state()?;

        Ok(CherryPickOutcome::Applied(new_oid))
    }

    fn fetch_branch(&self, name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(&self.remote)
            .map_err(|_| GitPromoteError::NoRemote(self.remote.clone()))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(Self::credential_callbacks());

        let refspec = format!("+refs/heads/{0}:refs/remotes/{1}/{0}", name, self.remote);
        remote.fetch(&[refspec.as_str()], Some(&mut fetch_options), None)?;

        Ok(())
    }

    fn push(&self, name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(&self.remote)
            .map_err(|_| GitPromoteError::NoRemote(self.remote.clone()))?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = Self::credential_callbacks();
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!("{}: {}", refname, status)))
            } else {
                Ok(())
            }
        });
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| GitPromoteError::push_rejected(name, e.message()))?;

        // Refresh the tracking ref so upstream can be recorded. Tracking is
        // a convenience; the push itself already succeeded.
        let _ = self.fetch_branch(name);
        if let Ok(mut branch) = self.repo.find_branch(name, BranchType::Local) {
            let _ = branch.set_upstream(Some(&format!("{}/{}", self.remote, name)));
        }

        Ok(())
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send. The workflow
// is single-threaded and callers hold the session exclusively; no operation
// is invoked concurrently.
unsafe impl Sync for Git2Repository {}
