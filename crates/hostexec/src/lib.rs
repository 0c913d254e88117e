//! # hostexec
//!
//! Process execution as an injectable capability.
//!
//! Every external tool the reconciler touches (package managers, key
//! tools, the alternatives registry, `java -version`) is invoked through
//! a [`CommandRunner`]. Commands are structured argument vectors built
//! with [`CommandSpec`]; nothing is ever passed through a shell, so
//! caller-influenced values such as repository specs and file paths are
//! never interpolated.
//!
//! ## Example
//!
//! ```no_run
//! use hostexec::{CommandRunner, CommandSpec, SystemRunner};
//!
//! let runner = SystemRunner::new();
//! let output = runner
//!     .run(&CommandSpec::new("dpkg-query").args(["-W", "openssl"]))
//!     .expect("spawn failed");
//! println!("exit code: {:?}", output.code);
//! ```
//!
//! ## Testing
//!
//! [`MockRunner`] answers commands from scripted rules and records every
//! invocation, so callers can assert on exactly which commands ran:
//!
//! ```
//! use hostexec::{CommandOutput, CommandRunner, CommandSpec, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.on(&["apt-key", "list"], CommandOutput::success("pub 1024D/5CB26B26"));
//!
//! let out = runner.run(&CommandSpec::new("apt-key").arg("list")).unwrap();
//! assert!(out.stdout_str().contains("5CB26B26"));
//! assert_eq!(runner.count(&["apt-key"]), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mock;
pub mod runner;
pub mod types;

pub use error::{Error, ErrorCategory, Result};
pub use mock::MockRunner;
pub use runner::{CommandRunner, SystemRunner};
pub use types::{CommandOutput, CommandSpec};
