use std::fmt;

/// Non-fatal conditions met during a release.
/// These are reported to the user and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tracked files have uncommitted changes
    DirtyWorkingTree { paths: Vec<String> },
    /// No new commits since the latest tag
    NoNewCommits { latest_tag: String },
    /// Latest tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// An explicit version does not move past the current one
    ExplicitVersionNotNewer { current: String, requested: String },
    /// The formula repository clone does not exist locally
    FormulaRepoMissing { path: String },
    /// The formula repository exists but the formula file does not
    FormulaFileMissing { path: String },
    /// The source archive could not be downloaded or hashed
    ArtifactDownloadFailed { url: String, reason: String },
    /// A formula field pattern matched nothing, so the field was left as is
    FormulaFieldNotRewritten { field: String, path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DirtyWorkingTree { paths } => {
                write!(
                    f,
                    "Working tree has {} uncommitted change(s); the tag will point at HEAD",
                    paths.len()
                )
            }
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {} (using 0.0.0)", tag, reason)
            }
            BoundaryWarning::ExplicitVersionNotNewer { current, requested } => {
                write!(
                    f,
                    "Requested version {} is not newer than current version {}",
                    requested, current
                )
            }
            BoundaryWarning::FormulaRepoMissing { path } => {
                write!(f, "Formula repository not found at '{}', skipping formula update", path)
            }
            BoundaryWarning::FormulaFileMissing { path } => {
                write!(f, "Formula file not found at '{}', skipping formula update", path)
            }
            BoundaryWarning::ArtifactDownloadFailed { url, reason } => {
                write!(
                    f,
                    "Could not download '{}': {} (formula not updated)",
                    url, reason
                )
            }
            BoundaryWarning::FormulaFieldNotRewritten { field, path } => {
                write!(f, "No {} field was rewritten in '{}'", field, path)
            }
        }
    }
}
