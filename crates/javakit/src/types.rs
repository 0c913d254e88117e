//! Variant and media format of a Java package

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime-only or full development kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Runtime environment
    Jre,
    /// Development kit (includes `javac`)
    Jdk,
}

impl Variant {
    /// Vendor file-name prefix.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Jre => "jre",
            Self::Jdk => "jdk",
        }
    }

    /// Whether this variant ships the compiler.
    #[must_use]
    pub fn is_sdk(self) -> bool {
        matches!(self, Self::Jdk)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Shape of the install media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFormat {
    /// Vendor `.rpm`, installed through the package manager
    #[default]
    Rpm,
    /// `.tar.gz` archive, unpacked in place
    Archive,
}

impl PackageFormat {
    /// File suffix in vendor names.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Rpm => ".rpm",
            Self::Archive => ".tar.gz",
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rpm => f.write_str("rpm"),
            Self::Archive => f.write_str("archive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant() {
        assert_eq!(Variant::Jre.prefix(), "jre");
        assert!(Variant::Jdk.is_sdk());
        assert!(!Variant::Jre.is_sdk());
    }

    #[test]
    fn test_format_suffix() {
        assert_eq!(PackageFormat::Rpm.suffix(), ".rpm");
        assert_eq!(PackageFormat::Archive.suffix(), ".tar.gz");
        assert_eq!(PackageFormat::default(), PackageFormat::Rpm);
    }
}
