use std::collections::HashMap;
use std::fmt;

/// Bucket a commit subject lands in for the release notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitCategory {
    Feature,
    Improvement,
    Fix,
    Other,
}

impl CommitCategory {
    /// Order in which sections appear in rendered notes
    pub const RENDER_ORDER: [CommitCategory; 4] = [
        CommitCategory::Feature,
        CommitCategory::Improvement,
        CommitCategory::Fix,
        CommitCategory::Other,
    ];

    /// Section heading used in release notes
    pub fn heading(&self) -> &'static str {
        match self {
            CommitCategory::Feature => "## ✨ New Features",
            CommitCategory::Improvement => "## 🚀 Improvements",
            CommitCategory::Fix => "## 🐛 Bug Fixes",
            CommitCategory::Other => "## 📝 Other Changes",
        }
    }
}

impl fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommitCategory::Feature => "Feature",
            CommitCategory::Improvement => "Improvement",
            CommitCategory::Fix => "Fix",
            CommitCategory::Other => "Other",
        };
        f.write_str(name)
    }
}

/// One entry of the classification table: a category and its keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: CommitCategory,
    pub keywords: &'static [&'static str],
}

impl CategoryRule {
    /// Substring match against an already lower-cased subject.
    ///
    /// Substring matching is deliberately loose: "fixture" matches "fix"
    /// and "address" matches "add".
    pub fn matches(&self, lowered_subject: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_subject.contains(keyword))
    }
}

/// Rules in evaluation order; the first match wins and anything left over
/// is [`CommitCategory::Other`].
pub const CATEGORY_RULES: [CategoryRule; 3] = [
    CategoryRule {
        category: CommitCategory::Feature,
        keywords: &["feat", "feature", "add", "new"],
    },
    CategoryRule {
        category: CommitCategory::Fix,
        keywords: &["fix", "bug", "patch", "resolve"],
    },
    CategoryRule {
        category: CommitCategory::Improvement,
        keywords: &["improve", "enhance", "update", "optimize", "refactor"],
    },
];

/// Category for a single commit subject
pub fn categorize(subject: &str) -> CommitCategory {
    let lowered = subject.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .unwrap_or(CommitCategory::Other)
}

/// Commit subjects grouped by category, each group in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedCommits {
    groups: HashMap<CommitCategory, Vec<String>>,
}

impl CategorizedCommits {
    pub fn entries(&self, category: CommitCategory) -> &[String] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn push(&mut self, category: CommitCategory, subject: impl Into<String>) {
        self.groups.entry(category).or_default().push(subject.into());
    }

    /// Total number of classified commits
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty groups in render order
    pub fn sections(&self) -> impl Iterator<Item = (CommitCategory, &[String])> {
        CommitCategory::RENDER_ORDER
            .into_iter()
            .map(move |category| (category, self.entries(category)))
            .filter(|(_, entries)| !entries.is_empty())
    }
}

/// Partition commit subjects into categories, preserving order within each
pub fn classify<S: AsRef<str>>(commits: &[S]) -> CategorizedCommits {
    let mut categorized = CategorizedCommits::default();
    for subject in commits {
        let subject = subject.as_ref();
        categorized.push(categorize(subject), subject);
    }
    categorized
}
