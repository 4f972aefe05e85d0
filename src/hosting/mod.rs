//! Hosting-platform collaborator
//!
//! Releases are published through the platform's command-line client.
//! [gh::GhCli] drives the GitHub CLI; [mock::MockHost] records calls for tests.

pub mod gh;
pub mod mock;

pub use gh::GhCli;
pub use mock::MockHost;

use crate::error::Result;

/// Operations the workflow needs from the hosting platform
pub trait ReleaseHost: Send + Sync {
    /// Fail fast when the client is missing or not authenticated
    fn ensure_ready(&self) -> Result<()>;

    /// Publish a release for an already-pushed tag
    ///
    /// # Returns
    /// * `Ok(url)` - Web URL of the new release
    fn create_release(&self, tag: &str, title: &str, notes: &str) -> Result<String>;

    /// Whether a release exists for the tag
    fn release_exists(&self, tag: &str) -> Result<bool>;
}
