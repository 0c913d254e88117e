//! Java release versions.
//!
//! Two textual forms are accepted:
//!
//! | Form    | Example         | Grammar                              |
//! |---------|-----------------|--------------------------------------|
//! | full    | `1.7.0_40-b43`  | `[1.]major[.minor[_release[-bbuild]]]` |
//! | update  | `7u40-b43`      | `major[urelease[-bbuild]]`           |
//!
//! Majors are limited to a single digit `0..=7`. Missing fields are zero.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static FULL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:1\.)?(?P<major>[0-7])(?:\.(?P<minor>\d+)(?:_(?P<release>\d+)(?:-b(?P<build>\d+))?)?)?$",
    )
    .expect("valid version pattern")
});

static UPDATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>[0-7])(?:u(?P<release>\d+)(?:-b(?P<build>\d+))?)?$")
        .expect("valid update pattern")
});

/// Majors the installers know how to obtain.
pub const SUPPORTED_MAJORS: &[u32] = &[6, 7];

/// Newest known build per major. Installs always bump to this.
const LATEST: &[JavaVersion] = &[JavaVersion::new(7, 0, 40, 43)];

/// A Java release, ordered field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct JavaVersion {
    /// Major (the `7` in `1.7.0_40`)
    pub major: u32,
    /// Minor (the `0` in `1.7.0_40`)
    pub minor: u32,
    /// Update release (the `40` in `1.7.0_40`)
    pub release: u32,
    /// Vendor build number (the `43` in `7u40-b43`)
    pub build: u32,
}

impl JavaVersion {
    /// Create a version from its four fields.
    #[must_use]
    pub const fn new(major: u32, minor: u32, release: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            release,
            build,
        }
    }

    /// Parse either textual form.
    ///
    /// Empty or non-matching text yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let caps = FULL_PATTERN
            .captures(text)
            .or_else(|| UPDATE_PATTERN.captures(text))?;

        let field = |name: &str| -> Option<u32> {
            caps.name(name).map_or(Some(0), |m| m.as_str().parse().ok())
        };

        Some(Self {
            major: field("major")?,
            minor: field("minor")?,
            release: field("release")?,
            build: field("build")?,
        })
    }

    /// `1.{major}.{minor}_{release}`
    #[must_use]
    pub fn format_version(&self) -> String {
        format!("1.{}.{}_{}", self.major, self.minor, self.release)
    }

    /// `{major}u{release}`
    #[must_use]
    pub fn format_update(&self) -> String {
        format!("{}u{}", self.major, self.release)
    }

    /// `{major}u{release}-b{build}`, build zero-padded to two digits.
    #[must_use]
    pub fn format_build(&self) -> String {
        format!("{}-b{:02}", self.format_update(), self.build)
    }

    /// The same version with the build number cleared.
    #[must_use]
    pub const fn without_build(self) -> Self {
        Self { build: 0, ..self }
    }

    /// Newest known build of `major`.
    #[must_use]
    pub fn latest(major: u32) -> Option<Self> {
        LATEST.iter().copied().find(|v| v.major == major)
    }

    /// Whether `major` is in [`SUPPORTED_MAJORS`].
    #[must_use]
    pub fn is_supported_major(major: u32) -> bool {
        SUPPORTED_MAJORS.contains(&major)
    }

    /// Newest supported major that has a known latest build.
    #[must_use]
    pub fn default_latest() -> Option<Self> {
        SUPPORTED_MAJORS.iter().rev().find_map(|m| Self::latest(*m))
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_version())
    }
}

impl FromStr for JavaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.trim()).ok_or_else(|| Error::InvalidVersion(s.to_string()))
    }
}
