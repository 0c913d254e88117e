//! Where install media comes from.
//!
//! Media is named the way the vendor names it
//! (`{jre|jdk}-{update}-linux-{arch}{suffix}`), so a pre-fetched directory
//! of vendor files can stand in for the download site.

use crate::download::Downloader;
use crate::error::{Error, Result};
use crate::platform::Arch;
use crate::types::{PackageFormat, Variant};
use crate::version::JavaVersion;
use std::path::{Path, PathBuf};

/// Canonical vendor download prefix.
pub const VENDOR_DOWNLOAD_URL: &str = "http://download.oracle.com/otn-pub/java/jdk/";

/// Header that marks the vendor license as accepted.
pub const LICENSE_COOKIE: (&str, &str) = ("Cookie", "gpw_e24=http%3A%2F%2Fwww.oracle.com%2F");

const SELF_EXTRACTING_SUFFIX: &str = ".bin";

const MIRROR_URL: &str = "http://javadl.sun.com/webapps/download/AutoDL?BundleId=";

/// Mirror bundle ids: (major, arch, rpm id, self-extracting id).
const MIRROR_BUNDLES: &[(u32, Arch, u32, u32)] = &[
    (7, Arch::X64, 80804, 80805),
    (7, Arch::I586, 80802, 80803),
];

/// Resolved install media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file already on this host
    Local(PathBuf),
    /// A URL plus the file name to save it under
    Remote {
        /// Download URL
        url: String,
        /// Vendor file name
        file_name: String,
    },
}

/// Resolves, names and fetches install media.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    arch: Arch,
    package_location: Option<String>,
}

impl SourceResolver {
    /// Create a resolver for `arch` with no location override.
    #[must_use]
    pub fn new(arch: Arch) -> Self {
        Self {
            arch,
            package_location: None,
        }
    }

    /// Take media from `location` (absolute path or URL, file or directory)
    /// instead of the vendor site.
    #[must_use]
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.package_location = location.filter(|l| !l.is_empty());
        self
    }

    /// Vendor file name.
    #[must_use]
    pub fn file_name(&self, version: &JavaVersion, variant: Variant, format: PackageFormat) -> String {
        format!(
            "{}-{}-linux-{}{}",
            variant.prefix(),
            version.format_update(),
            self.arch,
            format.suffix()
        )
    }

    /// Canonical vendor URL, which needs the license cookie.
    #[must_use]
    pub fn canonical_url(&self, version: &JavaVersion, variant: Variant, format: PackageFormat) -> String {
        format!(
            "{}{}/{}",
            VENDOR_DOWNLOAD_URL,
            version.format_build(),
            self.file_name(version, variant, format)
        )
    }

    /// Public mirror URL for runtime media, if the mirror carries the major.
    #[must_use]
    pub fn mirror_url(&self, version: &JavaVersion, format: PackageFormat) -> Option<String> {
        MIRROR_BUNDLES
            .iter()
            .find(|(major, arch, _, _)| *major == version.major && *arch == self.arch)
            .map(|(_, _, rpm, bin)| match format {
                PackageFormat::Rpm => format!("{MIRROR_URL}{rpm}"),
                PackageFormat::Archive => format!("{MIRROR_URL}{bin}"),
            })
    }

    /// Where to download from when there is no override.
    ///
    /// Development kits only come from the vendor; runtimes prefer the
    /// mirror and fall back to the vendor.
    #[must_use]
    pub fn vendor_url(&self, version: &JavaVersion, variant: Variant, format: PackageFormat) -> String {
        match variant {
            Variant::Jdk => self.canonical_url(version, variant, format),
            Variant::Jre => self
                .mirror_url(version, format)
                .unwrap_or_else(|| self.canonical_url(version, variant, format)),
        }
    }

    /// Format actually delivered, given the configured one.
    ///
    /// An override that names a tarball or a self-extracting bundle forces
    /// [`PackageFormat::Archive`].
    #[must_use]
    pub fn effective_format(&self, requested: PackageFormat) -> PackageFormat {
        match &self.package_location {
            Some(loc)
                if loc.ends_with(PackageFormat::Archive.suffix())
                    || loc.ends_with(SELF_EXTRACTING_SUFFIX) =>
            {
                PackageFormat::Archive
            }
            _ => requested,
        }
    }

    /// Decide where the media for `version` comes from.
    ///
    /// # Errors
    ///
    /// Fails if the override is relative, or names a path (or a file inside
    /// a directory) that does not exist.
    pub fn locate(&self, version: &JavaVersion, variant: Variant, format: PackageFormat) -> Result<Source> {
        let file_name = self.file_name(version, variant, format);

        let Some(location) = self.package_location.as_deref() else {
            let url = self.vendor_url(version, variant, format);
            // The mirror ships archives as self-extracting bundles.
            let file_name = match format {
                PackageFormat::Archive if !url.starts_with(VENDOR_DOWNLOAD_URL) => {
                    file_name.replace(PackageFormat::Archive.suffix(), SELF_EXTRACTING_SUFFIX)
                }
                _ => file_name,
            };
            return Ok(Source::Remote { url, file_name });
        };

        if location.contains("://") {
            if location.ends_with('/') {
                let url = format!("{location}{file_name}");
                return Ok(Source::Remote { url, file_name });
            }
            let file_name = if location.ends_with(SELF_EXTRACTING_SUFFIX) {
                file_name.replace(PackageFormat::Archive.suffix(), SELF_EXTRACTING_SUFFIX)
            } else {
                file_name
            };
            return Ok(Source::Remote {
                url: location.to_string(),
                file_name,
            });
        }

        let path = Path::new(location);
        if !path.is_absolute() {
            return Err(Error::InvalidLocation(location.to_string()));
        }
        if !path.exists() {
            return Err(Error::MissingPath {
                path: path.to_path_buf(),
            });
        }
        if path.is_dir() {
            let file = path.join(&file_name);
            if !file.exists() {
                return Err(Error::MissingPath { path: file });
            }
            return Ok(Source::Local(file));
        }
        Ok(Source::Local(path.to_path_buf()))
    }

    /// Make `source` available as a local file under `dest_dir`.
    ///
    /// Local sources are used in place. A remote file already present in
    /// `dest_dir` is reused.
    pub fn fetch(&self, source: &Source, dest_dir: &Path, downloader: &dyn Downloader) -> Result<PathBuf> {
        match source {
            Source::Local(path) => Ok(path.clone()),
            Source::Remote { url, file_name } => {
                let dest = dest_dir.join(file_name);
                if dest.is_file() {
                    log::debug!("Reusing {}", dest.display());
                    return Ok(dest);
                }
                let headers: &[(&str, &str)] = if url.starts_with(VENDOR_DOWNLOAD_URL) {
                    &[LICENSE_COOKIE]
                } else {
                    &[]
                };
                downloader.fetch(url, headers, &dest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::MockDownloader;
    use std::fs;
    use tempfile::TempDir;

    const V7: JavaVersion = JavaVersion::new(7, 0, 40, 43);

    #[test]
    fn test_file_name() {
        let r = SourceResolver::new(Arch::X64);
        assert_eq!(
            r.file_name(&V7, Variant::Jre, PackageFormat::Rpm),
            "jre-7u40-linux-x64.rpm"
        );
        let r = SourceResolver::new(Arch::I586);
        assert_eq!(
            r.file_name(&V7, Variant::Jdk, PackageFormat::Archive),
            "jdk-7u40-linux-i586.tar.gz"
        );
    }

    #[test]
    fn test_jdk_uses_vendor_url() {
        let r = SourceResolver::new(Arch::X64);
        assert_eq!(
            r.vendor_url(&V7, Variant::Jdk, PackageFormat::Rpm),
            "http://download.oracle.com/otn-pub/java/jdk/7u40-b43/jdk-7u40-linux-x64.rpm"
        );
    }

    #[test]
    fn test_jre_prefers_mirror() {
        let r = SourceResolver::new(Arch::X64);
        assert_eq!(
            r.vendor_url(&V7, Variant::Jre, PackageFormat::Rpm),
            "http://javadl.sun.com/webapps/download/AutoDL?BundleId=80804"
        );
        let r = SourceResolver::new(Arch::I586);
        assert_eq!(
            r.vendor_url(&V7, Variant::Jre, PackageFormat::Archive),
            "http://javadl.sun.com/webapps/download/AutoDL?BundleId=80803"
        );
    }

    #[test]
    fn test_mirror_archive_is_named_as_bundle() {
        let r = SourceResolver::new(Arch::X64);
        let source = r.locate(&V7, Variant::Jre, PackageFormat::Archive).unwrap();
        assert_eq!(
            source,
            Source::Remote {
                url: "http://javadl.sun.com/webapps/download/AutoDL?BundleId=80805".into(),
                file_name: "jre-7u40-linux-x64.bin".into(),
            }
        );
    }

    #[test]
    fn test_jre_without_mirror_falls_back() {
        let r = SourceResolver::new(Arch::X64);
        let v6 = JavaVersion::new(6, 0, 45, 6);
        assert!(r.mirror_url(&v6, PackageFormat::Rpm).is_none());
        assert!(
            r.vendor_url(&v6, Variant::Jre, PackageFormat::Rpm)
                .starts_with(VENDOR_DOWNLOAD_URL)
        );
    }

    #[test]
    fn test_locate_directory_override() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("jre-7u40-linux-x64.rpm"), b"x").unwrap();

        let r = SourceResolver::new(Arch::X64)
            .with_location(Some(tmp.path().to_string_lossy().to_string()));
        let source = r.locate(&V7, Variant::Jre, PackageFormat::Rpm).unwrap();
        assert_eq!(source, Source::Local(tmp.path().join("jre-7u40-linux-x64.rpm")));

        let err = r.locate(&V7, Variant::Jdk, PackageFormat::Rpm).unwrap_err();
        assert!(matches!(err, Error::MissingPath { .. }));
    }

    #[test]
    fn test_locate_rejects_missing_and_relative() {
        let r = SourceResolver::new(Arch::X64).with_location(Some("/nonexistent/java".into()));
        assert!(matches!(
            r.locate(&V7, Variant::Jre, PackageFormat::Rpm),
            Err(Error::MissingPath { .. })
        ));

        let r = SourceResolver::new(Arch::X64).with_location(Some("media/java".into()));
        assert!(matches!(
            r.locate(&V7, Variant::Jre, PackageFormat::Rpm),
            Err(Error::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_locate_url_directory() {
        let r = SourceResolver::new(Arch::X64)
            .with_location(Some("http://mirror.local/java/".into()));
        let source = r.locate(&V7, Variant::Jdk, PackageFormat::Rpm).unwrap();
        assert_eq!(
            source,
            Source::Remote {
                url: "http://mirror.local/java/jdk-7u40-linux-x64.rpm".into(),
                file_name: "jdk-7u40-linux-x64.rpm".into(),
            }
        );
    }

    #[test]
    fn test_effective_format() {
        let r = SourceResolver::new(Arch::X64)
            .with_location(Some("/srv/jdk-7u40-linux-x64.tar.gz".into()));
        assert_eq!(r.effective_format(PackageFormat::Rpm), PackageFormat::Archive);

        let r = SourceResolver::new(Arch::X64);
        assert_eq!(r.effective_format(PackageFormat::Rpm), PackageFormat::Rpm);
    }

    #[test]
    fn test_bundle_override_is_archive() {
        let r = SourceResolver::new(Arch::X64)
            .with_location(Some("/srv/jre-7u40-linux-x64.bin".into()));
        assert_eq!(r.effective_format(PackageFormat::Rpm), PackageFormat::Archive);

        let r = SourceResolver::new(Arch::X64)
            .with_location(Some("http://mirror.local/jre-7u40-linux-x64.bin".into()));
        assert_eq!(r.effective_format(PackageFormat::Rpm), PackageFormat::Archive);
        assert_eq!(
            r.locate(&V7, Variant::Jre, PackageFormat::Archive).unwrap(),
            Source::Remote {
                url: "http://mirror.local/jre-7u40-linux-x64.bin".into(),
                file_name: "jre-7u40-linux-x64.bin".into(),
            }
        );
    }

    #[test]
    fn test_fetch_vendor_sends_cookie() {
        let tmp = TempDir::new().unwrap();
        let r = SourceResolver::new(Arch::X64);
        let dl = MockDownloader::serving(b"rpm".to_vec());

        let source = r.locate(&V7, Variant::Jdk, PackageFormat::Rpm).unwrap();
        let path = r.fetch(&source, tmp.path(), &dl).unwrap();
        assert_eq!(path, tmp.path().join("jdk-7u40-linux-x64.rpm"));

        let calls = dl.calls();
        assert_eq!(
            calls[0].headers,
            [(
                "Cookie".to_string(),
                "gpw_e24=http%3A%2F%2Fwww.oracle.com%2F".to_string()
            )]
        );
    }

    #[test]
    fn test_fetch_mirror_has_no_cookie_and_reuses_file() {
        let tmp = TempDir::new().unwrap();
        let r = SourceResolver::new(Arch::X64);
        let dl = MockDownloader::serving(b"rpm".to_vec());

        let source = r.locate(&V7, Variant::Jre, PackageFormat::Rpm).unwrap();
        r.fetch(&source, tmp.path(), &dl).unwrap();
        r.fetch(&source, tmp.path(), &dl).unwrap();

        let calls = dl.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].headers.is_empty());
    }

    #[test]
    fn test_fetch_local_is_in_place() {
        let r = SourceResolver::new(Arch::X64);
        let dl = MockDownloader::failing();
        let src = Source::Local(PathBuf::from("/srv/jre.rpm"));
        assert_eq!(
            r.fetch(&src, Path::new("/tmp"), &dl).unwrap(),
            PathBuf::from("/srv/jre.rpm")
        );
        assert!(dl.calls().is_empty());
    }
}
