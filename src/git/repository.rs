use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use git2::{Oid, Repository as Git2Repo, Sort, StatusOptions};
use log::debug;
use std::collections::HashMap;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            ReleaseError::config(format!(
                "Not inside a git working copy ({}): {}",
                path.as_ref().display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Open the repository rooted exactly at `path`, without searching parents
    pub fn open_exact<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path.as_ref()).map_err(|e| {
            ReleaseError::config(format!(
                "{} is not a git repository: {}",
                path.as_ref().display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head().map_err(|e| {
            ReleaseError::tag(format!("Cannot resolve HEAD: {}", e.message()))
        })?;
        Ok(head.peel_to_commit()?.id())
    }

    /// Map of commit OID to the tag names pointing at it
    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tag_oids: HashMap<Oid, Vec<String>> = HashMap::new();
        let tags = self.repo.tag_names(None)?;

        for tag_name in tags.iter().flatten() {
            if let Ok(tag_ref) = self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                // Handles both lightweight and annotated tags
                if let Ok(commit) = tag_ref.peel_to_commit() {
                    tag_oids
                        .entry(commit.id())
                        .or_default()
                        .push(tag_name.to_string());
                }
            }
        }

        Ok(tag_oids)
    }

    fn tag_commit_oid(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| ReleaseError::tag(format!("Cannot find tag '{}': {}", tag_name, e)))?;
        Ok(reference.peel_to_commit()?.id())
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            ReleaseError::remote(format!("Remote '{}' not found", remote_name))
        })?;

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(remote_callbacks());

        debug!("Pushing {} to {}", refspec, remote_name);
        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| {
                ReleaseError::remote(format!(
                    "Push of '{}' to '{}' failed: {}",
                    refspec, remote_name, e
                ))
            })?;

        Ok(())
    }
}

/// Credential and push-status callbacks shared by every push.
///
/// Supports SSH authentication via SSH keys from ~/.ssh/, the SSH agent, or
/// the default credential helper.
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });

    // A rejected ref is reported here rather than as an Err from push()
    callbacks.push_update_reference(|refname, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "remote rejected {}: {}",
            refname, message
        ))),
        None => Ok(()),
    });

    callbacks
}

impl super::Repository for Git2Repository {
    fn latest_tag(&self) -> Result<Option<String>> {
        let tag_oids = self.tags_by_commit()?;
        if tag_oids.is_empty() {
            return Ok(None);
        }

        let head = match self.head_oid() {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        for oid in revwalk {
            let oid = oid?;
            if let Some(names) = tag_oids.get(&oid) {
                // Several tags on one commit: prefer the highest version
                let best = names
                    .iter()
                    .max_by_key(|name| Version::parse(name).ok())
                    .cloned();
                return Ok(best);
            }
        }

        Ok(None)
    }

    fn commit_subjects(
        &self,
        since_tag: Option<&str>,
        fallback_limit: usize,
    ) -> Result<Vec<String>> {
        let head = self.head_oid()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        let limit = match since_tag {
            Some(tag) => {
                revwalk.hide(self.tag_commit_oid(tag)?)?;
                usize::MAX
            }
            None => fallback_limit,
        };

        let mut subjects = Vec::new();
        for oid in revwalk.take(limit) {
            let commit = self.repo.find_commit(oid?)?;
            let subject = commit.summary().unwrap_or("(empty message)").to_string();
            subjects.push(subject);
        }

        debug!(
            "Read {} commit(s) since {}",
            subjects.len(),
            since_tag.unwrap_or("repository start")
        );
        Ok(subjects)
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses
            .iter()
            .filter(|entry| entry.status() != git2::Status::CURRENT)
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let found = self.repo.find_remote(remote).map_err(|_| {
            ReleaseError::remote(format!("No remote named '{}' is configured", remote))
        })?;

        found
            .url()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::remote(format!("Remote '{}' has no URL", remote)))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        let mut names: Vec<String> = tags.iter().flatten().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.head_oid()?;
        let object = self
            .repo
            .find_object(head, None)
            .map_err(|e| ReleaseError::tag(format!("Cannot find object: {}", e)))?;
        let tagger = self.repo.signature().map_err(|e| {
            ReleaseError::tag(format!("Cannot determine tagger identity: {}", e.message()))
        })?;

        self.repo
            .tag(name, &object, &tagger, message, false)
            .map_err(|e| ReleaseError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.push_refspec(remote, &format!("refs/tags/{}:refs/tags/{}", tag, tag))
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(path)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.repo.find_commit(self.head_oid()?)?;
        let signature = self.repo.signature()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        debug!("Committed {} as {}", path.display(), oid);

        Ok(())
    }

    fn push_head(&self, remote: &str) -> Result<()> {
        let head = self.repo.head()?;
        let branch = head
            .name()
            .filter(|name| name.starts_with("refs/heads/"))
            .ok_or_else(|| ReleaseError::remote("HEAD is not on a branch".to_string()))?
            .to_string();

        self.push_refspec(remote, &format!("{}:{}", branch, branch))
    }
}

// SAFETY: Git2Repository is only used from the single thread that opened it;
// the trait requires Sync so implementations can sit behind shared references.
unsafe impl Sync for Git2Repository {}
