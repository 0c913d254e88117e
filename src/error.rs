//! Error type for the reconciliation run.
//!
//! Library errors keep their own categories; [`Error::kind`] folds them into
//! the five kinds reported to the user.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What went wrong, as reported in the failure output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unparseable or unsupported version or state
    InvalidInput,
    /// Unknown distribution or architecture, or no install mapping
    Unsupported,
    /// Version-reporting output present but unparseable
    Discovery,
    /// A mutating command, download or extraction failed
    Tool,
    /// The host does not match the target after a step claimed success
    PostCondition,
}

impl ErrorKind {
    /// Snake-case name used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::Unsupported => "unsupported",
            Self::Discovery => "discovery",
            Self::Tool => "tool",
            Self::PostCondition => "post_condition",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("unable to parse Java version from '{0}'")]
    Discovery(String),

    #[error("post-condition failed: {0}")]
    PostCondition(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Exec(#[from] hostexec::Error),

    #[error(transparent)]
    Package(#[from] pkgkit::Error),

    #[error(transparent)]
    Media(#[from] javakit::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Unsupported(_) => ErrorKind::Unsupported,
            Error::Discovery(_) => ErrorKind::Discovery,
            Error::PostCondition(_) => ErrorKind::PostCondition,
            Error::Io { .. } | Error::Exec(_) => ErrorKind::Tool,
            Error::Package(e) => match e.category() {
                pkgkit::ErrorCategory::Unsupported => ErrorKind::Unsupported,
                pkgkit::ErrorCategory::Tool | pkgkit::ErrorCategory::Io => ErrorKind::Tool,
            },
            Error::Media(e) => match e.category() {
                javakit::ErrorCategory::Input => ErrorKind::InvalidInput,
                javakit::ErrorCategory::Platform => ErrorKind::Unsupported,
                _ => ErrorKind::Tool,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
