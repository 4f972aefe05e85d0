use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid release type '{0}': expected patch, minor, major or vX.Y.Z")]
    InvalidReleaseType(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Hosting operation failed: {0}")]
    Hosting(String),

    #[error("Required tool '{0}' is not installed or not on PATH")]
    MissingTool(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Formula update failed: {0}")]
    Formula(String),

    #[error("Verification failed: {0}")]
    Verification(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }

    pub fn hosting(msg: impl Into<String>) -> Self {
        ReleaseError::Hosting(msg.into())
    }

    pub fn command(msg: impl Into<String>) -> Self {
        ReleaseError::Command(msg.into())
    }

    pub fn formula(msg: impl Into<String>) -> Self {
        ReleaseError::Formula(msg.into())
    }

    pub fn verification(msg: impl Into<String>) -> Self {
        ReleaseError::Verification(msg.into())
    }
}
