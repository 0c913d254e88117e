//! Backend abstraction for system package managers.
//!
//! The [`Backend`] trait is the family-neutral surface the installers use.
//! Every implementation takes a [`hostexec::CommandRunner`] so tests can
//! script the tools.

pub mod apt;
pub mod yum;

use crate::error::Result;
use std::path::Path;

/// Backend trait for package manager operations.
///
/// `install` and `uninstall` return `true` only when they changed the
/// host. A package argument may be a repository name, `name=version`, or
/// the path of a local package file.
pub trait Backend: Send + Sync {
    /// Short name of the package manager.
    fn name(&self) -> &'static str;

    /// Check if a package is installed.
    fn installed(&self, name: &str) -> Result<bool>;

    /// Install a package unless it is already present.
    fn install(&self, package: &str) -> Result<bool>;

    /// Remove a package if it is present.
    fn uninstall(&self, name: &str) -> Result<bool>;

    /// Refresh repository metadata.
    fn update(&self) -> Result<()>;
}

/// Whether a package argument names a local package file.
pub(crate) fn is_local_file(package: &str) -> bool {
    Path::new(package).is_file()
}
