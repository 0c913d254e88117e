//! # pkgkit
//!
//! Idempotent package management over the two Linux package families.
//!
//! This crate provides:
//! - A [`Backend`] trait with `installed`/`install`/`uninstall`/`update`
//! - [`AptBackend`] for Debian-family hosts, with debconf pre-seeding
//! - [`YumBackend`] for RHEL-family hosts
//! - [`apt::AptRepository`] and [`apt::AptKey`] for APT sources and signing keys
//! - [`distro`] detection from `/etc/os-release`
//!
//! Every mutating call first checks presence, so repeating an operation
//! is a no-op that reports `false`. Any non-zero exit from a mutating tool
//! invocation is returned as an error; nothing is retried.
//!
//! ## Example
//!
//! ```no_run
//! use hostexec::SystemRunner;
//! use pkgkit::{Backend, distro};
//! use std::path::Path;
//!
//! let runner = SystemRunner::new();
//! let dist = distro::detect(Path::new("/etc/os-release")).expect("unsupported host");
//! let backend = dist.family.backend(&runner);
//!
//! if backend.install("curl").expect("install failed") {
//!     println!("installed curl via {}", backend.name());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod apt;
pub mod backend;
pub mod distro;
pub mod error;
pub mod types;

pub use backend::{Backend, apt::AptBackend, yum::YumBackend};
pub use distro::{Distribution, Family};
pub use error::{Error, ErrorCategory, Result};
pub use types::{DebconfSelection, PackageSpec, PackageStatus, RepoSpec};
