//! Error types for package operations.
//!
//! Errors are categorized so the caller can tell a failed tool from an
//! unsupported host, and report each appropriately.

use std::path::PathBuf;
use thiserror::Error;

/// Categories of package errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A package or repository tool failed or is missing
    Tool,
    /// The host or request is outside what this crate supports
    Unsupported,
    /// Reading or writing host files failed
    Io,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Tool => "Package tool failed",
            Self::Unsupported => "Unsupported environment",
            Self::Io => "File access failed",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Tool => "Check the command output above; the host was left as the tool left it",
            Self::Unsupported => "Only Debian/Ubuntu and Fedora/RHEL/CentOS hosts are supported",
            Self::Io => "Check file permissions or run with appropriate access",
        }
    }
}

/// Errors that can occur during package operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A tool invocation failed
    #[error(transparent)]
    Command(#[from] hostexec::Error),

    /// The distribution is not one of the supported families
    #[error("distribution not supported: {id}")]
    UnsupportedDistribution {
        /// `ID` from os-release, or a description of what was missing
        id: String,
    },

    /// A repository spec that is neither a `deb` line nor a `ppa:` handle
    #[error("unsupported repository spec: {0}")]
    UnsupportedRepository(String),

    /// Could not read the package name out of a package file
    #[error("cannot read package metadata from {path}: {message}")]
    Metadata {
        /// Package file
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// IO error on a host file
    #[error("IO error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Command(_) | Error::Metadata { .. } => ErrorCategory::Tool,
            Error::UnsupportedDistribution { .. } | Error::UnsupportedRepository(_) => {
                ErrorCategory::Unsupported
            }
            Error::Io { .. } => ErrorCategory::Io,
        }
    }
}

/// Result type for package operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = Error::UnsupportedDistribution {
            id: "arch".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Unsupported);

        let err = Error::from(hostexec::Error::NotFound {
            program: "yum".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::Tool);

        let err = Error::io(
            "/etc/apt/sources.list",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_advice_not_empty() {
        assert!(!ErrorCategory::Tool.advice().is_empty());
        assert!(!ErrorCategory::Unsupported.description().is_empty());
    }

    #[test]
    fn test_command_error_is_transparent() {
        let err = Error::from(hostexec::Error::Failed {
            command: "yum -y remove jdk".to_string(),
            code: Some(1),
            stderr: String::new(),
        });
        assert!(err.to_string().starts_with("command failed"));
    }
}
