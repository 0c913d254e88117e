//! Error types for version handling and install media.

use std::io;
use std::path::PathBuf;

/// Categories of errors for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad version text or package location
    Input,
    /// Host architecture not published by the vendor
    Platform,
    /// Network failure while downloading
    Network,
    /// Archive or installer did not produce what was expected
    Format,
    /// Filesystem failure
    Io,
    /// An external command failed
    Tool,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "Invalid input",
            Self::Platform => "Unsupported platform",
            Self::Network => "Download failed",
            Self::Format => "Unexpected package contents",
            Self::Io => "File access failed",
            Self::Tool => "Command failed",
        }
    }
}

/// Errors that can occur in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Version text matched neither grammar.
    #[error("invalid Java version: '{0}'")]
    InvalidVersion(String),

    /// The machine architecture has no vendor build.
    #[error("unsupported architecture: {arch}")]
    UnsupportedArch {
        /// `std::env::consts::ARCH` value
        arch: String,
    },

    /// A package location that is neither an absolute path nor a URL.
    #[error("invalid package location: {0}")]
    InvalidLocation(String),

    /// A local package location that does not exist.
    #[error("non-existent path: {}", path.display())]
    MissingPath {
        /// Path that was checked
        path: PathBuf,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// Extraction did not produce the expected directory.
    #[error("extraction of {} failed: {message}", path.display())]
    Extraction {
        /// Media being extracted
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// IO error during file operations.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Running a self-extracting installer failed.
    #[error(transparent)]
    Command(#[from] hostexec::Error),
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidVersion(_) | Error::InvalidLocation(_) | Error::MissingPath { .. } => {
                ErrorCategory::Input
            }
            Error::UnsupportedArch { .. } => ErrorCategory::Platform,
            Error::Http { .. } => ErrorCategory::Network,
            Error::Extraction { .. } => ErrorCategory::Format,
            Error::Io { .. } => ErrorCategory::Io,
            Error::Command(_) => ErrorCategory::Tool,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {code}"),
                status: Some(code),
            },
            other => Self::Http {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            Error::InvalidVersion("8u5".into()).category(),
            ErrorCategory::Input
        );
        assert_eq!(
            Error::UnsupportedArch {
                arch: "aarch64".into()
            }
            .category(),
            ErrorCategory::Platform
        );
        assert_eq!(
            Error::from(ureq::Error::StatusCode(404)).category(),
            ErrorCategory::Network
        );
    }

    #[test]
    fn test_status_code_message() {
        let err = Error::from(ureq::Error::StatusCode(403));
        assert!(matches!(err, Error::Http { status: Some(403), .. }));
        assert_eq!(err.to_string(), "HTTP request failed: HTTP 403");
    }

    #[test]
    fn test_missing_path_display() {
        let err = Error::MissingPath {
            path: PathBuf::from("/srv/java/jre-7u40-linux-x64.rpm"),
        };
        assert_eq!(
            err.to_string(),
            "non-existent path: /srv/java/jre-7u40-linux-x64.rpm"
        );
    }

    #[test]
    fn test_descriptions_not_empty() {
        for cat in [
            ErrorCategory::Input,
            ErrorCategory::Platform,
            ErrorCategory::Network,
            ErrorCategory::Format,
            ErrorCategory::Io,
            ErrorCategory::Tool,
        ] {
            assert!(!cat.description().is_empty());
        }
    }
}
