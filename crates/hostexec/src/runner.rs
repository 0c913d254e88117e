//! The process-execution capability
//!
//! [`CommandRunner`] is the only way the rest of the workspace talks to
//! external programs. [`SystemRunner`] runs them for real; tests inject
//! [`crate::MockRunner`] or their own implementation.

use crate::error::{Error, Result};
use crate::types::{CommandOutput, CommandSpec};
use std::io::Write;
use std::process::{Command, Stdio};

/// Provider for running external commands
///
/// Implementations block until the child exits. Only `run` is required;
/// the checked variants are derived from it.
pub trait CommandRunner: Send + Sync {
    /// Run a command and return its output, whatever the exit status.
    ///
    /// Fails only when the program cannot be started. A missing program
    /// is reported as [`Error::NotFound`].
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput>;

    /// Run a command and fail on a non-zero exit status.
    fn run_checked(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        let output = self.run(cmd)?;
        if !output.success_status() {
            return Err(Error::Failed {
                command: cmd.to_string(),
                code: output.code,
                stderr: output.stderr_str().trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Run a command, fail on non-zero exit, and capture trimmed stdout.
    fn run_capture(&self, cmd: &CommandSpec) -> Result<String> {
        Ok(self.run_checked(cmd)?.stdout_str().trim().to_string())
    }

    /// Run a command and return just success/failure
    fn run_status(&self, cmd: &CommandSpec) -> Result<bool> {
        Ok(self.run(cmd)?.success_status())
    }
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        log::debug!("Running: {}", cmd);

        let mut command = Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .envs(cmd.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if cmd.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    program: cmd.program.clone(),
                }
            } else {
                Error::Spawn {
                    command: cmd.to_string(),
                    source: e,
                }
            }
        })?;

        if let Some(input) = &cmd.stdin
            && let Some(mut stdin) = child.stdin.take()
        {
            // A child that exits without reading its input closes the pipe;
            // the exit status below is what matters.
            if let Err(e) = stdin.write_all(input) {
                log::debug!("stdin write to {} ended early: {}", cmd.program, e);
            }
        }

        let output = child.wait_with_output().map_err(|e| Error::Spawn {
            command: cmd.to_string(),
            source: e,
        })?;

        let output = CommandOutput::from(output);
        log::trace!("{} exited with {:?}", cmd.program, output.code);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_found() {
        let runner = SystemRunner::new();
        let err = runner
            .run(&CommandSpec::new("definitely-not-a-real-program-javactl"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout_and_code() {
        let runner = SystemRunner::new();
        let out = runner
            .run(&CommandSpec::new("sh").args(["-c", "printf hello; exit 3"]))
            .unwrap();
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout_str(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_checked_fails_on_nonzero() {
        let runner = SystemRunner::new();
        let err = runner.run_checked(&CommandSpec::new("false")).unwrap_err();
        assert!(matches!(err, Error::Failed { code: Some(1), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdin_and_cwd_are_passed() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new();
        let out = runner
            .run_capture(
                &CommandSpec::new("sh")
                    .args(["-c", "cat; pwd"])
                    .stdin("yes\n")
                    .current_dir(dir.path()),
            )
            .unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        assert!(out.starts_with("yes"));
        assert!(out.ends_with(canonical.to_str().unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn test_env_is_passed() {
        let runner = SystemRunner::new();
        let out = runner
            .run_capture(
                &CommandSpec::new("sh")
                    .args(["-c", "printf %s \"$DEBIAN_FRONTEND\""])
                    .env("DEBIAN_FRONTEND", "noninteractive"),
            )
            .unwrap();
        assert_eq!(out, "noninteractive");
    }
}
