//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! operations a release needs, allowing for a real repository backed by
//! `git2` and a mock implementation for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation that journals calls
//!
//! Workflow code depends on the [Repository] trait, so the version math,
//! classification and composition can be exercised without a real checkout.
//!
//! ```rust
//! # use git_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
//! let latest = repo.latest_tag()?;
//! let subjects = repo.commit_subjects(latest.as_deref(), 5)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{Journal, MockRepository};
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::Path;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the matching
/// [crate::error::ReleaseError] variants.
pub trait Repository: Send + Sync {
    /// Most recent tag reachable from HEAD, like `git describe --tags --abbrev=0`
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - Name of the nearest tag
    /// * `Ok(None)` - If no tag is reachable from HEAD
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Commit subjects (first message line), newest first
    ///
    /// With `since_tag`, returns commits in `since_tag..HEAD`. Without it,
    /// returns at most `fallback_limit` commits from HEAD.
    fn commit_subjects(&self, since_tag: Option<&str>, fallback_limit: usize)
        -> Result<Vec<String>>;

    /// Paths with uncommitted changes to tracked files
    fn dirty_paths(&self) -> Result<Vec<String>>;

    /// Fetch URL of a named remote
    ///
    /// # Returns
    /// * `Err` - If the remote is not configured or has no URL
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// All tag names in the repository, sorted alphabetically
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Create an annotated tag at HEAD
    ///
    /// # Returns
    /// * `Err` - If the tag already exists or HEAD cannot be resolved
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// Stage one file (relative to the working directory) and commit it on HEAD
    fn commit_file(&self, path: &Path, message: &str) -> Result<()>;

    /// Push the currently checked-out branch to a remote
    fn push_head(&self, remote: &str) -> Result<()>;
}
