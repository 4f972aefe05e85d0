//! Domain logic - pure release rules independent of git or the hosting platform

pub mod commit;
pub mod notes;
pub mod remote;
pub mod version;

pub use commit::{classify, CategorizedCommits, CommitCategory, CATEGORY_RULES};
pub use notes::{compose, extract_title, release_title, NotesFooter, ReleaseNotes};
pub use version::{next_version, ReleaseType, Version};
