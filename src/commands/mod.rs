pub mod apply;
pub mod status;

use anyhow::Result;
use hostexec::SystemRunner;
use javakit::HttpDownloader;
use pkgkit::Distribution;
use std::path::Path;

use crate::config::Settings;
use crate::installer::{self, HostContext, JavaInstaller};

/// The real host: settings, distribution, and the process and download
/// capabilities every command shares.
pub struct Host {
    pub runner: SystemRunner,
    pub downloader: HttpDownloader,
    pub settings: Settings,
    pub distribution: Distribution,
}

impl Host {
    /// Load settings (with `package_location` overriding the file) and
    /// identify the distribution.
    pub fn load(config: Option<&Path>, package_location: Option<String>) -> Result<Self> {
        let mut settings = Settings::load(config)?;
        if package_location.is_some() {
            settings.package_location = package_location;
        }

        let distribution = pkgkit::distro::detect(&settings.os_release)
            .map_err(crate::error::Error::from)?;

        Ok(Self {
            runner: SystemRunner::new(),
            downloader: HttpDownloader::new(),
            settings,
            distribution,
        })
    }

    pub fn installer(&self) -> Result<Box<dyn JavaInstaller + '_>> {
        let ctx = HostContext {
            runner: &self.runner,
            downloader: &self.downloader,
            settings: &self.settings,
            distribution: &self.distribution,
            arch: None,
        };
        Ok(installer::select(&ctx)?)
    }
}
