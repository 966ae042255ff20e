use thiserror::Error;

use crate::domain::ParseVersionError;

/// Unified error type for git-version operations
#[derive(Error, Debug)]
pub enum GitVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Malformed version tag '{tag}': {source}")]
    MalformedTag {
        tag: String,
        #[source]
        source: ParseVersionError,
    },

    #[error("Tag '{0}' already exists")]
    TagExists(String),

    #[error("Tag message is missing")]
    MissingMessage,

    #[error("Label error: {0}")]
    Label(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An interactive terminal is required")]
    NotATerminal,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-version
pub type Result<T> = std::result::Result<T, GitVersionError>;

impl GitVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitVersionError::Config(msg.into())
    }

    /// Create a label error with context
    pub fn label(msg: impl Into<String>) -> Self {
        GitVersionError::Label(msg.into())
    }

    /// Create a "not a repository" error for the given path
    pub fn not_a_repository(path: impl Into<String>) -> Self {
        GitVersionError::NotARepository(path.into())
    }
}
