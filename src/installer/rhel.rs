//! RHEL-family flow: vendor media installed from the rpm or unpacked in place.

use super::{HostContext, JavaInstaller};
use crate::environment::EnvironmentRegistrar;
use crate::error::{Error, Result};
use hostexec::CommandRunner;
use javakit::{Arch, Downloader, JavaVersion, PackageFormat, SourceResolver, Variant};
use pkgkit::{Backend, Family};
use std::fs;
use std::path::{Path, PathBuf};

/// Vendor rpm packages, by the name each variant installs as.
const PACKAGES: &[&str] = &["jdk", "jre"];

/// Link the vendor rpm maintains to the newest install.
const DEFAULT_LINK: &str = "default";

pub struct RhelInstaller<'a> {
    runner: &'a dyn CommandRunner,
    downloader: &'a dyn Downloader,
    packages: Box<dyn Backend + 'a>,
    resolver: SourceResolver,
    format: PackageFormat,
    install_root: PathBuf,
    download_dir: Option<PathBuf>,
    registrar: EnvironmentRegistrar<'a>,
}

impl<'a> RhelInstaller<'a> {
    pub fn new(ctx: &HostContext<'a>, arch: Arch) -> Self {
        let rhel = &ctx.settings.rhel;
        Self {
            runner: ctx.runner,
            downloader: ctx.downloader,
            packages: Family::Rhel.backend(ctx.runner),
            resolver: SourceResolver::new(arch)
                .with_location(ctx.settings.package_location.clone()),
            format: rhel.package_format,
            install_root: rhel.install_root.clone(),
            download_dir: ctx.settings.download_dir.clone(),
            registrar: ctx.registrar(&rhel.install_root),
        }
    }

    fn format(&self) -> PackageFormat {
        self.resolver.effective_format(self.format)
    }

    fn ensure_dir(path: &Path) -> Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }
        log::info!("Creating {}", path.display());
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
        set_mode(path)?;
        Ok(true)
    }

    /// Fetch and, for archives, unpack the media. Returns the home it
    /// provides and whether anything changed.
    fn stage(&self, variant: Variant, version: &JavaVersion) -> Result<(PathBuf, bool)> {
        let format = self.format();
        let source = self.resolver.locate(version, variant, format)?;

        let download_dir = self.download_dir.as_deref().unwrap_or(&self.install_root);
        Self::ensure_dir(download_dir)?;
        let media = self.resolver.fetch(&source, download_dir, self.downloader)?;

        match format {
            PackageFormat::Rpm => {
                let changed = self.packages.install(&media.to_string_lossy())?;
                Ok((self.install_root.join(DEFAULT_LINK), changed))
            }
            PackageFormat::Archive => {
                let extracted = javakit::extract::extract(&media, &self.install_root, self.runner)?;
                Ok((extracted.path, extracted.changed))
            }
        }
    }
}

impl JavaInstaller for RhelInstaller<'_> {
    fn family(&self) -> Family {
        Family::Rhel
    }

    fn supports(&self, _variant: Variant, version: &JavaVersion) -> bool {
        JavaVersion::latest(version.major).is_some()
    }

    fn install(&self, variant: Variant, version: &JavaVersion) -> Result<bool> {
        let mut changed = Self::ensure_dir(&self.install_root)?;

        let (home, staged) = self.stage(variant, version)?;
        changed |= staged;

        changed |= self.registrar.install(&home)?;
        Ok(changed)
    }

    fn uninstall(&self) -> Result<bool> {
        let mut changed = false;
        for package in PACKAGES {
            changed |= self.packages.uninstall(package)?;
        }
        changed |= self.registrar.uninstall(None)?;
        Ok(changed)
    }

    fn java_home(&self, variant: Variant, version: &JavaVersion) -> PathBuf {
        match self.format() {
            PackageFormat::Rpm => self.install_root.join(DEFAULT_LINK),
            PackageFormat::Archive => self
                .install_root
                .join(format!("{}{}", variant.prefix(), version.format_version())),
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path) -> Result<()> {
    Ok(())
}
