//! Error types for command execution.

use thiserror::Error;

/// Categories of execution errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The program does not exist on this host
    Missing,
    /// The program ran and exited non-zero
    Failed,
    /// The program could not be started for another reason
    Spawn,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Missing => "Program not found",
            Self::Failed => "Command exited with an error",
            Self::Spawn => "Command could not be started",
        }
    }
}

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// The program was not found in PATH
    #[error("program not found: {program}")]
    NotFound {
        /// Program that could not be located
        program: String,
    },

    /// The program could not be spawned
    #[error("failed to execute {command}: {source}")]
    Spawn {
        /// Rendered command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The program exited with a non-zero status
    #[error("command failed ({}): {command}{}", code.map_or_else(|| "signal".to_string(), |c| format!("exit {c}")), if stderr.is_empty() { String::new() } else { format!(": {stderr}") })]
    Failed {
        /// Rendered command line
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Trimmed standard error
        stderr: String,
    },
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFound { .. } => ErrorCategory::Missing,
            Error::Spawn { .. } => ErrorCategory::Spawn,
            Error::Failed { .. } => ErrorCategory::Failed,
        }
    }

    /// Whether the program itself is absent from the host.
    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::Missing
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, Error>;
