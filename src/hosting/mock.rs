use crate::error::{ReleaseError, Result};
use crate::git::Journal;
use crate::hosting::ReleaseHost;
use std::sync::Mutex;

/// A release the mock host was asked to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRelease {
    pub tag: String,
    pub title: String,
    pub notes: String,
}

/// In-memory hosting platform for tests
#[derive(Default)]
pub struct MockHost {
    releases: Mutex<Vec<CreatedRelease>>,
    not_ready: bool,
    fail_create: bool,
    /// Pretend created releases are invisible to later lookups
    hide_releases: bool,
    journal: Journal,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn not_ready(mut self) -> Self {
        self.not_ready = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn hiding_releases(mut self) -> Self {
        self.hide_releases = true;
        self
    }

    pub fn releases(&self) -> Vec<CreatedRelease> {
        self.releases
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ReleaseHost for MockHost {
    fn ensure_ready(&self) -> Result<()> {
        self.journal.record("ensure_ready");
        if self.not_ready {
            return Err(ReleaseError::MissingTool("gh".to_string()));
        }
        Ok(())
    }

    fn create_release(&self, tag: &str, title: &str, notes: &str) -> Result<String> {
        self.journal.record(format!("create_release {}", tag));
        if self.fail_create {
            return Err(ReleaseError::hosting(format!(
                "Cannot create release for {}",
                tag
            )));
        }
        self.releases
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(CreatedRelease {
                tag: tag.to_string(),
                title: title.to_string(),
                notes: notes.to_string(),
            });
        Ok(format!("https://example.test/releases/tag/{}", tag))
    }

    fn release_exists(&self, tag: &str) -> Result<bool> {
        self.journal.record(format!("release_exists {}", tag));
        if self.hide_releases {
            return Ok(false);
        }
        Ok(self.releases().iter().any(|release| release.tag == tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_host_round_trip() {
        let host = MockHost::new();
        assert!(!host.release_exists("v1.0.0").unwrap());

        let url = host.create_release("v1.0.0", "Title", "Notes").unwrap();
        assert!(url.ends_with("/v1.0.0"));
        assert!(host.release_exists("v1.0.0").unwrap());
        assert_eq!(host.releases()[0].title, "Title");
    }

    #[test]
    fn test_mock_host_hidden_releases() {
        let host = MockHost::new().hiding_releases();
        host.create_release("v1.0.0", "Title", "Notes").unwrap();
        assert!(!host.release_exists("v1.0.0").unwrap());
    }
}
