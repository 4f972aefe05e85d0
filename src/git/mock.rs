use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, ordered record of collaborator calls
///
/// Mocks of different collaborators can write into the same journal so a
/// test can assert the order of operations across them.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        lock(&self.entries).push(entry.into());
    }

    /// Snapshot of all recorded entries
    pub fn entries(&self) -> Vec<String> {
        lock(&self.entries).clone()
    }

    /// Operation names without their arguments ("push_tag origin v1.0.0" -> "push_tag")
    pub fn operations(&self) -> Vec<String> {
        lock(&self.entries)
            .iter()
            .map(|entry| entry.split_whitespace().next().unwrap_or_default().to_string())
            .collect()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    subjects: Vec<String>,
    tags: Mutex<Vec<String>>,
    latest_tag: Option<String>,
    remotes: Vec<(String, String)>,
    dirty: Vec<String>,
    failing: HashSet<String>,
    committed: Mutex<Vec<(String, String)>>,
    journal: Journal,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            subjects: Vec::new(),
            tags: Mutex::new(Vec::new()),
            latest_tag: None,
            remotes: Vec::new(),
            dirty: Vec::new(),
            failing: HashSet::new(),
            committed: Mutex::new(Vec::new()),
            journal: Journal::new(),
        }
    }

    /// Record calls into a shared journal
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    /// Add a commit subject; subjects are kept newest first
    pub fn add_commit(mut self, subject: impl Into<String>) -> Self {
        self.subjects.insert(0, subject.into());
        self
    }

    /// Add an existing tag that becomes the latest reachable tag
    pub fn add_tag(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        lock(&self.tags).push(name.clone());
        self.latest_tag = Some(name);
        self
    }

    pub fn add_remote(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.remotes.push((name.into(), url.into()));
        self
    }

    pub fn add_dirty_path(mut self, path: impl Into<String>) -> Self {
        self.dirty.push(path.into());
        self
    }

    /// Make the named trait operation return an error
    pub fn fail_on(mut self, operation: impl Into<String>) -> Self {
        self.failing.insert(operation.into());
        self
    }

    /// Files committed through [`Repository::commit_file`], with their messages
    pub fn committed(&self) -> Vec<(String, String)> {
        lock(&self.committed).clone()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    fn check(&self, operation: &str) -> Result<()> {
        if self.failing.contains(operation) {
            return Err(ReleaseError::command(format!("mock {} failed", operation)));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn latest_tag(&self) -> Result<Option<String>> {
        self.journal.record("latest_tag");
        self.check("latest_tag")?;
        Ok(self.latest_tag.clone())
    }

    fn commit_subjects(
        &self,
        since_tag: Option<&str>,
        fallback_limit: usize,
    ) -> Result<Vec<String>> {
        self.journal.record(format!(
            "commit_subjects {} {}",
            since_tag.unwrap_or("-"),
            fallback_limit
        ));
        self.check("commit_subjects")?;
        Ok(match since_tag {
            Some(_) => self.subjects.clone(),
            None => self.subjects.iter().take(fallback_limit).cloned().collect(),
        })
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        self.journal.record("dirty_paths");
        self.check("dirty_paths")?;
        Ok(self.dirty.clone())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.journal.record(format!("remote_url {}", remote));
        self.check("remote_url")?;
        self.remotes
            .iter()
            .find(|(name, _)| name == remote)
            .map(|(_, url)| url.clone())
            .ok_or_else(|| ReleaseError::remote(format!("No remote named '{}' is configured", remote)))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        self.journal.record("list_tags");
        self.check("list_tags")?;
        let mut tags = lock(&self.tags).clone();
        tags.sort();
        Ok(tags)
    }

    fn create_tag(&self, name: &str, _message: &str) -> Result<()> {
        self.journal.record(format!("create_tag {}", name));
        self.check("create_tag")?;
        let mut tags = lock(&self.tags);
        if tags.iter().any(|t| t == name) {
            return Err(ReleaseError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.push(name.to_string());
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.journal.record(format!("push_tag {} {}", remote, tag));
        self.check("push_tag")
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        self.journal.record(format!("commit_file {}", path.display()));
        self.check("commit_file")?;
        lock(&self.committed).push((path.display().to_string(), message.to_string()));
        Ok(())
    }

    fn push_head(&self, remote: &str) -> Result<()> {
        self.journal.record(format!("push_head {}", remote));
        self.check("push_head")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_latest_tag() {
        let repo = MockRepository::new().add_tag("v1.0.0").add_tag("v1.1.0");
        assert_eq!(repo.latest_tag().unwrap(), Some("v1.1.0".to_string()));
        assert_eq!(MockRepository::new().latest_tag().unwrap(), None);
    }

    #[test]
    fn test_mock_repository_commit_fallback_limit() {
        let mut repo = MockRepository::new();
        for i in 1..=8 {
            repo = repo.add_commit(format!("commit {}", i));
        }

        let recent = repo.commit_subjects(None, 5).unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0], "commit 8");

        let all = repo.commit_subjects(Some("v1.0.0"), 5).unwrap();
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn test_mock_repository_create_tag_rejects_duplicates() {
        let repo = MockRepository::new().add_tag("v1.0.0");
        assert!(repo.create_tag("v1.0.0", "again").is_err());
        repo.create_tag("v1.0.1", "Release v1.0.1").unwrap();
        assert_eq!(repo.list_tags().unwrap(), vec!["v1.0.0", "v1.0.1"]);
    }

    #[test]
    fn test_mock_repository_failures() {
        let repo = MockRepository::new().fail_on("push_tag");
        assert!(repo.push_tag("origin", "v1.0.0").is_err());
        assert!(repo.push_head("origin").is_ok());
    }

    #[test]
    fn test_journal_shared_between_mocks() {
        let journal = Journal::new();
        let a = MockRepository::new().with_journal(journal.clone());
        let b = MockRepository::new().with_journal(journal.clone());

        a.push_tag("origin", "v1.0.0").unwrap();
        b.push_head("origin").unwrap();

        assert_eq!(
            journal.entries(),
            vec!["push_tag origin v1.0.0", "push_head origin"]
        );
        assert_eq!(journal.operations(), vec!["push_tag", "push_head"]);
    }

    #[test]
    fn test_mock_repository_remote_url() {
        let repo = MockRepository::new().add_remote("origin", "git@github.com:acme/tool.git");
        assert_eq!(
            repo.remote_url("origin").unwrap(),
            "git@github.com:acme/tool.git"
        );
        assert!(repo.remote_url("upstream").is_err());
    }
}
