//! # javakit
//!
//! Everything about a Java release that does not depend on the host's
//! package manager.
//!
//! - [`JavaVersion`]: parsing and ordering of `1.7.0_40` / `7u40-b43` forms,
//!   plus the vendor naming helpers and the latest-known build table
//! - [`Arch`]: vendor architecture names (`x64`, `i586`)
//! - [`SourceResolver`]: where install media comes from and how it is named
//! - [`Downloader`]: the fetch capability, with [`HttpDownloader`] over `ureq`
//! - [`extract`](extract::extract): one-shot unpacking of `.tar.gz` and `.bin` media
//!
//! ## Example
//!
//! ```
//! use javakit::{Arch, JavaVersion, PackageFormat, SourceResolver, Variant};
//!
//! let version = JavaVersion::parse("7u40-b43").unwrap();
//! assert_eq!(version.format_version(), "1.7.0_40");
//!
//! let resolver = SourceResolver::new(Arch::X64);
//! assert_eq!(
//!     resolver.file_name(&version, Variant::Jdk, PackageFormat::Rpm),
//!     "jdk-7u40-linux-x64.rpm"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod download;
pub mod error;
pub mod extract;
pub mod platform;
pub mod source;
pub mod types;
pub mod version;

pub use download::{Downloader, HttpDownloader, MockDownloader};
pub use error::{Error, ErrorCategory, Result};
pub use extract::Extracted;
pub use platform::Arch;
pub use source::{Source, SourceResolver};
pub use types::{PackageFormat, Variant};
pub use version::JavaVersion;
