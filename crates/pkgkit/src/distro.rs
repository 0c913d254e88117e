//! Host distribution detection from `/etc/os-release`

use crate::backend::{Backend, apt::AptBackend, yum::YumBackend};
use crate::error::{Error, Result};
use hostexec::CommandRunner;
use std::path::Path;

/// Package family of a supported distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// dpkg/APT based
    Debian,
    /// rpm/YUM based
    Rhel,
}

impl Family {
    /// Name of the alternatives tool on this family.
    pub fn alternatives_command(self) -> &'static str {
        match self {
            Self::Debian => "update-alternatives",
            Self::Rhel => "alternatives",
        }
    }

    /// Package backend for this family.
    pub fn backend<'a>(self, runner: &'a dyn CommandRunner) -> Box<dyn Backend + 'a> {
        match self {
            Self::Debian => Box::new(AptBackend::new(runner)),
            Self::Rhel => Box::new(YumBackend::new(runner)),
        }
    }

    /// Display name for messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Debian => "debian",
            Self::Rhel => "rhel",
        }
    }
}

/// Distribution ids this crate knows how to drive.
const KNOWN: &[(&str, Family)] = &[
    ("ubuntu", Family::Debian),
    ("debian", Family::Debian),
    ("linuxmint", Family::Debian),
    ("fedora", Family::Rhel),
    ("rhel", Family::Rhel),
    ("centos", Family::Rhel),
];

/// A detected host distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Lowercase `ID`
    pub id: String,
    /// `ID_LIKE` entries
    pub id_like: Vec<String>,
    /// `VERSION_ID`, if present
    pub version_id: Option<String>,
    /// Resolved package family
    pub family: Family,
}

impl Distribution {
    /// Parse the contents of an os-release file.
    ///
    /// The family comes from `ID`, falling back to the first known
    /// `ID_LIKE` entry.
    pub fn parse(content: &str) -> Result<Self> {
        let mut id = None;
        let mut id_like = Vec::new();
        let mut version_id = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value);
            match key.trim() {
                "ID" => id = Some(value.to_lowercase()),
                "ID_LIKE" => {
                    id_like = value
                        .split_whitespace()
                        .map(str::to_lowercase)
                        .collect();
                }
                "VERSION_ID" => version_id = Some(value.to_string()),
                _ => {}
            }
        }

        let id = id.ok_or_else(|| Error::UnsupportedDistribution {
            id: "unknown (no ID in os-release)".to_string(),
        })?;

        let family = lookup(&id)
            .or_else(|| id_like.iter().find_map(|like| lookup(like)))
            .ok_or_else(|| Error::UnsupportedDistribution { id: id.clone() })?;

        Ok(Self {
            id,
            id_like,
            version_id,
            family,
        })
    }

    /// Numeric `(major, minor)` of `VERSION_ID`; missing parts are zero.
    pub fn version(&self) -> Option<(u32, u32)> {
        let v = self.version_id.as_deref()?;
        let mut parts = v.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map_or(Some(0), |m| m.parse().ok())?;
        Some((major, minor))
    }

    /// Whether `add-apt-repository` on this host needs `-y` to run
    /// unattended.
    ///
    /// Debian always takes it; Ubuntu only from 11.10 on.
    pub fn add_apt_repository_needs_yes(&self) -> bool {
        match self.id.as_str() {
            "debian" => true,
            "ubuntu" => self.version().is_some_and(|v| v >= (11, 10)),
            _ => false,
        }
    }
}

/// Read and parse an os-release file.
pub fn detect(path: &Path) -> Result<Distribution> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let dist = Distribution::parse(&content)?;
    log::debug!(
        "Detected distribution {} {} ({})",
        dist.id,
        dist.version_id.as_deref().unwrap_or("?"),
        dist.family.name()
    );
    Ok(dist)
}

fn lookup(id: &str) -> Option<Family> {
    KNOWN
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, family)| *family)
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const UBUNTU_1204: &str = r#"NAME="Ubuntu"
VERSION="12.04.5 LTS, Precise Pangolin"
ID=ubuntu
ID_LIKE=debian
VERSION_ID="12.04"
"#;

    #[test]
    fn test_parse_ubuntu() {
        let dist = Distribution::parse(UBUNTU_1204).unwrap();
        assert_eq!(dist.id, "ubuntu");
        assert_eq!(dist.family, Family::Debian);
        assert_eq!(dist.version(), Some((12, 4)));
        assert!(dist.add_apt_repository_needs_yes());
    }

    #[test]
    fn test_old_ubuntu_does_not_take_yes() {
        let dist = Distribution::parse("ID=ubuntu\nVERSION_ID=\"11.04\"\n").unwrap();
        assert!(!dist.add_apt_repository_needs_yes());

        let dist = Distribution::parse("ID=ubuntu\nVERSION_ID=\"11.10\"\n").unwrap();
        assert!(dist.add_apt_repository_needs_yes());
    }

    #[test]
    fn test_debian_always_takes_yes() {
        let dist = Distribution::parse("ID=debian\nVERSION_ID=\"7\"\n").unwrap();
        assert_eq!(dist.version(), Some((7, 0)));
        assert!(dist.add_apt_repository_needs_yes());
    }

    #[test]
    fn test_parse_rhel_family() {
        let dist = Distribution::parse("ID=\"centos\"\nVERSION_ID=\"6\"\n").unwrap();
        assert_eq!(dist.family, Family::Rhel);
        assert_eq!(dist.family.alternatives_command(), "alternatives");
        assert!(!dist.add_apt_repository_needs_yes());

        let dist = Distribution::parse("ID=fedora\n").unwrap();
        assert_eq!(dist.family, Family::Rhel);
    }

    #[test]
    fn test_id_like_fallback() {
        let dist = Distribution::parse("ID=rocky\nID_LIKE=\"rhel centos fedora\"\n").unwrap();
        assert_eq!(dist.family, Family::Rhel);
    }

    #[test]
    fn test_unsupported() {
        let err = Distribution::parse("ID=arch\n").unwrap_err();
        assert!(matches!(err, Error::UnsupportedDistribution { ref id } if id == "arch"));

        assert!(Distribution::parse("NAME=nothing\n").is_err());
    }

    #[test]
    fn test_detect_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("os-release");
        fs::write(&path, UBUNTU_1204).unwrap();

        let dist = detect(&path).unwrap();
        assert_eq!(dist.family.alternatives_command(), "update-alternatives");

        let err = detect(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
