//! Package, repository and debconf value types

use crate::error::{Error, Result};
use std::fmt;

/// A package argument as given to a backend: `name` or `name=version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Package name
    pub name: String,
    /// Pinned version, if any
    pub version: Option<String>,
}

impl PackageSpec {
    /// Split `name=version` into its parts.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('=') {
            Some((name, version)) => Self {
                name: name.trim().to_string(),
                version: Some(version.trim().to_string()),
            },
            None => Self {
                name: spec.trim().to_string(),
                version: None,
            },
        }
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}={}", self.name, v),
            None => write!(f, "{}", self.name),
        }
    }
}

/// One line of `dpkg-query` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStatus {
    /// Package name
    pub name: String,
    /// Installed or known version
    pub version: String,
    /// Raw status triple, e.g. `install ok installed`
    pub status: String,
}

impl PackageStatus {
    /// Parse a tab-separated `${Package}\t${Version}\t${Status}` line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split('\t');
        let name = fields.next()?.trim();
        let version = fields.next()?.trim();
        let status = fields.next()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
            status: status.to_string(),
        })
    }

    /// Whether dpkg considers the package fully installed.
    pub fn is_installed(&self) -> bool {
        self.status == "install ok installed"
    }
}

/// An APT repository, either a literal sources line or a Launchpad PPA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSpec {
    /// A `deb ...` or `deb-src ...` line, matched verbatim
    Line(String),
    /// A `ppa:owner/name` handle (stored without the prefix)
    Ppa(String),
}

impl RepoSpec {
    /// Parse a repository spec.
    ///
    /// Anything other than a `deb`/`deb-src` line or a `ppa:` handle is
    /// rejected.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if let Some(handle) = spec.strip_prefix("ppa:") {
            if handle.is_empty() {
                return Err(Error::UnsupportedRepository(spec.to_string()));
            }
            return Ok(Self::Ppa(handle.to_string()));
        }
        match spec.split_whitespace().next() {
            Some("deb" | "deb-src") => Ok(Self::Line(spec.to_string())),
            _ => Err(Error::UnsupportedRepository(spec.to_string())),
        }
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => write!(f, "{line}"),
            Self::Ppa(handle) => write!(f, "ppa:{handle}"),
        }
    }
}

/// A debconf pre-answer, fed to `debconf-set-selections`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebconfSelection {
    /// Owning package
    pub package: String,
    /// Question name
    pub question: String,
    /// Question type (`select`, `boolean`, `string`, ...)
    pub kind: String,
    /// Answer
    pub value: String,
}

impl DebconfSelection {
    /// Create a selection.
    pub fn new(
        package: impl Into<String>,
        question: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            question: question.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for DebconfSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.package, self.question, self.kind, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_spec_parse() {
        let spec = PackageSpec::parse("oracle-java7-installer");
        assert_eq!(spec.name, "oracle-java7-installer");
        assert_eq!(spec.version, None);

        let spec = PackageSpec::parse("jdk=1.7.0_40");
        assert_eq!(spec.name, "jdk");
        assert_eq!(spec.version.as_deref(), Some("1.7.0_40"));
        assert_eq!(spec.to_string(), "jdk=1.7.0_40");
    }

    #[test]
    fn test_package_status_parse() {
        let status = PackageStatus::parse("update-sun-jre\t1.4\tinstall ok installed").unwrap();
        assert_eq!(status.name, "update-sun-jre");
        assert!(status.is_installed());

        let status = PackageStatus::parse("foo\t\tdeinstall ok config-files").unwrap();
        assert!(!status.is_installed());

        assert!(PackageStatus::parse("garbage").is_none());
    }

    #[test]
    fn test_repo_spec_parse() {
        assert_eq!(
            RepoSpec::parse("ppa:webupd8team/java").unwrap(),
            RepoSpec::Ppa("webupd8team/java".to_string())
        );
        assert_eq!(
            RepoSpec::parse("deb http://www.duinsoft.nl/pkg debs all").unwrap(),
            RepoSpec::Line("deb http://www.duinsoft.nl/pkg debs all".to_string())
        );
        assert!(RepoSpec::parse("deb-src http://example.org/ stable main").is_ok());
        assert!(matches!(
            RepoSpec::parse("http://example.org/repo"),
            Err(Error::UnsupportedRepository(_))
        ));
        assert!(RepoSpec::parse("ppa:").is_err());
    }

    #[test]
    fn test_debconf_selection_display() {
        let sel = DebconfSelection::new(
            "oracle-java7-installer",
            "shared/accepted-oracle-license-v1-1",
            "select",
            "true",
        );
        assert_eq!(
            sel.to_string(),
            "oracle-java7-installer shared/accepted-oracle-license-v1-1 select true"
        );
    }
}
