//! Distribution-specific Java install and uninstall flows.
//!
//! Each host family gets one [`JavaInstaller`], chosen once per run by
//! [`select`]. Installers always install the newest known build of the
//! requested major; callers pass that build in.

mod debian;
mod rhel;

pub use debian::DebianInstaller;
pub use rhel::RhelInstaller;

use crate::config::Settings;
use crate::environment::EnvironmentRegistrar;
use crate::error::Result;
use hostexec::CommandRunner;
use javakit::{Arch, Downloader, JavaVersion, Variant};
use pkgkit::{Distribution, Family};
use std::path::{Path, PathBuf};

/// Install and uninstall flow for one host family.
pub trait JavaInstaller {
    fn family(&self) -> Family;

    /// Whether `variant` at `version` can be installed here at all.
    fn supports(&self, variant: Variant, version: &JavaVersion) -> bool;

    /// Install `variant` at `version` and register it as the active Java.
    fn install(&self, variant: Variant, version: &JavaVersion) -> Result<bool>;

    /// Remove every managed Java and its registration.
    fn uninstall(&self) -> Result<bool>;

    /// Home directory `install` leaves behind.
    fn java_home(&self, variant: Variant, version: &JavaVersion) -> PathBuf;
}

/// Host collaborators shared by the installers.
pub struct HostContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub downloader: &'a dyn Downloader,
    pub settings: &'a Settings,
    pub distribution: &'a Distribution,
    /// Architecture override; detected from the running machine when unset
    pub arch: Option<Arch>,
}

impl<'a> HostContext<'a> {
    fn registrar(&self, default_root: &Path) -> EnvironmentRegistrar<'a> {
        EnvironmentRegistrar::new(
            self.runner,
            &self.settings.env_file,
            &self.settings.link_dir,
            self.distribution.family.alternatives_command(),
            default_root,
        )
    }
}

/// Pick the installer for the host's distribution family.
pub fn select<'a>(ctx: &HostContext<'a>) -> Result<Box<dyn JavaInstaller + 'a>> {
    log::debug!(
        "Selecting {} installer for {}",
        ctx.distribution.family.name(),
        ctx.distribution.id
    );
    match ctx.distribution.family {
        Family::Debian => Ok(Box::new(DebianInstaller::new(ctx))),
        Family::Rhel => {
            let arch = match ctx.arch {
                Some(arch) => arch,
                None => javakit::platform::detect()?,
            };
            Ok(Box::new(RhelInstaller::new(ctx, arch)))
        }
    }
}
