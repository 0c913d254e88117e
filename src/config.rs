//! Settings file.
//!
//! Every key is optional; a missing file means all defaults, which match a
//! stock Debian or RHEL host.

use anyhow::{Context, Result};
use javakit::PackageFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// System environment file holding `JAVA_HOME`
    pub env_file: PathBuf,
    /// Directory for alternatives links
    pub link_dir: PathBuf,
    /// os-release file used for distribution detection
    pub os_release: PathBuf,
    /// Where downloads land; defaults to the install root
    pub download_dir: Option<PathBuf>,
    /// Absolute path or URL (file or directory) to take media from
    pub package_location: Option<String>,
    pub debian: DebianSettings,
    pub rhel: RhelSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from("/etc/environment"),
            link_dir: PathBuf::from("/usr/bin"),
            os_release: PathBuf::from("/etc/os-release"),
            download_dir: None,
            package_location: None,
            debian: DebianSettings::default(),
            rhel: RhelSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebianSettings {
    pub install_root: PathBuf,
    pub sources_list: PathBuf,
    pub sources_dir: PathBuf,
    pub keyserver: String,
    /// Package that provides `add-apt-repository`
    pub helper_package: String,
}

impl Default for DebianSettings {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("/usr/lib/jvm"),
            sources_list: PathBuf::from("/etc/apt/sources.list"),
            sources_dir: PathBuf::from("/etc/apt/sources.list.d"),
            keyserver: pkgkit::apt::key::DEFAULT_KEYSERVER.to_string(),
            helper_package: "python-software-properties".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RhelSettings {
    pub install_root: PathBuf,
    pub package_format: PackageFormat,
}

impl Default for RhelSettings {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("/usr/java"),
            package_format: PackageFormat::Rpm,
        }
    }
}

impl Settings {
    /// Load settings, resolving the file through [`paths::config_file`].
    pub fn load(flag: Option<&Path>) -> Result<Self> {
        let source = paths::config_file(flag);
        if !source.path.exists() {
            if source.required {
                anyhow::bail!("Config file not found: {}", source.path.display());
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&source.path)
            .with_context(|| format!("Could not read {}", source.path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config in {}", source.path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(content)?;
        settings.expand_paths();
        Ok(settings)
    }

    fn expand_paths(&mut self) {
        fn expand(p: &Path) -> PathBuf {
            paths::expand(&p.to_string_lossy())
        }
        self.env_file = expand(&self.env_file);
        self.link_dir = expand(&self.link_dir);
        self.os_release = expand(&self.os_release);
        self.download_dir = self.download_dir.as_deref().map(expand);
        self.debian.install_root = expand(&self.debian.install_root);
        self.debian.sources_list = expand(&self.debian.sources_list);
        self.debian.sources_dir = expand(&self.debian.sources_dir);
        self.rhel.install_root = expand(&self.rhel.install_root);
        self.package_location = self.package_location.take().map(|loc| {
            if loc.contains("://") {
                loc
            } else {
                paths::expand(&loc).to_string_lossy().to_string()
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let settings = Settings::from_toml(
            r#"
package_location = "/srv/java/"

[rhel]
package_format = "archive"

[debian]
keyserver = "keyserver.ubuntu.com"
"#,
        )
        .unwrap();
        assert_eq!(settings.package_location.as_deref(), Some("/srv/java/"));
        assert_eq!(settings.rhel.package_format, PackageFormat::Archive);
        assert_eq!(settings.rhel.install_root, PathBuf::from("/usr/java"));
        assert_eq!(settings.debian.keyserver, "keyserver.ubuntu.com");
        assert_eq!(settings.env_file, PathBuf::from("/etc/environment"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Settings::from_toml("[rhel]\npackage_format = \"zip\"\n").is_err());
    }

    #[test]
    fn test_url_location_not_expanded() {
        let settings =
            Settings::from_toml("package_location = \"http://mirror/java/\"\n").unwrap();
        assert_eq!(
            settings.package_location.as_deref(),
            Some("http://mirror/java/")
        );
    }

    #[test]
    fn test_load_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "link_dir = \"/usr/local/bin\"\n").unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.link_dir, PathBuf::from("/usr/local/bin"));

        let err = Settings::load(Some(tmp.path().join("missing.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
