use std::path::PathBuf;

use thiserror::Error;

/// Result type for tokeniser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading datasets, building vocabularies or encoding tokens
#[derive(Error, Debug)]
pub enum Error {
    /// A dataset line without a label or without question words
    #[error("Malformed dataset line {line} in {}: {reason}", path.display())]
    MalformedDatasetLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A rule name outside the supported set
    #[error("Unknown tokenisation rule: {0}")]
    UnknownRuleKey(String),

    /// A token missing from a frozen one-hot index
    #[error("Unknown token: {0:?}")]
    UnknownToken(String),

    /// A class label missing from the label index
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// A label index past the end of the label index
    #[error("Label index {index} out of range (have {len} labels)")]
    LabelIndexOutOfRange { index: usize, len: usize },

    /// Underlying file system failure
    #[error("Failed to access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file that could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Labels file that could not be parsed
    #[error("Invalid labels file: {0}")]
    InvalidLabels(String),
}

impl Error {
    /// Wrap an IO error with the path it happened on
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed dataset line error
    pub fn malformed_line(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDatasetLine {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
