//! Release notes composition.
//!
//! Notes render as markdown: a `# ` title line, one section per non-empty
//! commit category, then a footer with install guidance and a compare link.

use crate::domain::commit::CategorizedCommits;
use crate::domain::version::{ReleaseType, Version};

/// Static footer content shared by every generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesFooter {
    pub install_note: String,
    /// Web URL of the repository, without a trailing ".git"
    pub repo_url: String,
    /// Tag the comparison starts from, e.g. "v1.2.3"
    pub previous_tag: String,
}

impl NotesFooter {
    pub fn compare_url(&self, version: &Version) -> String {
        format!(
            "{}/compare/{}...{}",
            self.repo_url,
            self.previous_tag,
            version.tag_name()
        )
    }
}

/// Generated release notes document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub title: String,
    pub sections: Vec<NotesSection>,
    pub install_note: String,
    pub compare_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesSection {
    pub heading: &'static str,
    pub entries: Vec<String>,
}

impl ReleaseNotes {
    /// Markdown text handed to the hosting platform
    pub fn render(&self) -> String {
        let mut out = format!("# {}\n", self.title);

        for section in &self.sections {
            out.push('\n');
            out.push_str(section.heading);
            out.push('\n');
            for entry in &section.entries {
                out.push_str("- ");
                out.push_str(entry);
                out.push('\n');
            }
        }

        out.push_str("\n---\n\n");
        out.push_str(&format!("**Installation:** {}\n\n", self.install_note));
        out.push_str(&format!("**Full Changelog:** {}\n", self.compare_url));
        out
    }
}

/// Title for a release of the given type
pub fn release_title(version: &Version, release_type: &ReleaseType) -> String {
    let tag = version.tag_name();
    match release_type {
        ReleaseType::Major => format!("Major Release {}", tag),
        ReleaseType::Minor => format!("New Features & Improvements {}", tag),
        ReleaseType::Patch => format!("Bug Fixes & Improvements {}", tag),
        ReleaseType::Explicit(_) => format!("Release {}", tag),
    }
}

/// Assemble notes from classified commits
pub fn compose(
    version: &Version,
    release_type: &ReleaseType,
    categorized: &CategorizedCommits,
    footer: &NotesFooter,
) -> ReleaseNotes {
    let sections = categorized
        .sections()
        .map(|(category, entries)| NotesSection {
            heading: category.heading(),
            entries: entries.to_vec(),
        })
        .collect();

    ReleaseNotes {
        title: release_title(version, release_type),
        sections,
        install_note: footer.install_note.clone(),
        compare_url: footer.compare_url(version),
    }
}

/// Title of a notes body: its first line with a leading "# " removed
pub fn extract_title(notes: &str) -> String {
    let first_line = notes.lines().next().unwrap_or_default();
    first_line
        .strip_prefix("# ")
        .unwrap_or(first_line)
        .to_string()
}
