//! Vendor architecture names.

use crate::error::{Error, Result};
use std::fmt;

/// Architectures the vendor publishes Linux builds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit x86
    X64,
    /// 32-bit x86
    I586,
}

impl Arch {
    /// Map a machine name (`uname -m` or `std::env::consts::ARCH`).
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedArch` for anything that is not x86.
    pub fn from_machine(machine: &str) -> Result<Self> {
        match machine {
            "x86_64" | "amd64" => Ok(Self::X64),
            "x86" | "i386" | "i486" | "i586" | "i686" => Ok(Self::I586),
            other => Err(Error::UnsupportedArch {
                arch: other.to_string(),
            }),
        }
    }

    /// Vendor spelling used in file names.
    #[must_use]
    pub fn vendor_name(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::I586 => "i586",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vendor_name())
    }
}

/// Detect the architecture of the running binary.
///
/// # Errors
///
/// Returns `Error::UnsupportedArch` on non-x86 machines.
pub fn detect() -> Result<Arch> {
    Arch::from_machine(std::env::consts::ARCH)
}
