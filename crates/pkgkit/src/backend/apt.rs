//! APT backend using `apt-get`, `dpkg-query` and `dpkg-deb`.

use crate::backend::{Backend, is_local_file};
use crate::error::{Error, Result};
use crate::types::{DebconfSelection, PackageSpec, PackageStatus};
use hostexec::{CommandRunner, CommandSpec};
use std::path::PathBuf;

const APT_GET: &str = "apt-get";
const DPKG_QUERY: &str = "dpkg-query";
const DPKG_DEB: &str = "dpkg-deb";
const DEBCONF_SET_SELECTIONS: &str = "debconf-set-selections";

/// Backend for Debian-family hosts.
///
/// All `apt-get` invocations run with `DEBIAN_FRONTEND=noninteractive` and
/// `DEBIAN_PRIORITY=critical`, and keep existing config files on upgrade.
pub struct AptBackend<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> AptBackend<'a> {
    /// Create a backend over `runner`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// The runner this backend drives.
    pub fn runner(&self) -> &'a dyn CommandRunner {
        self.runner
    }

    fn apt_get(&self) -> CommandSpec {
        CommandSpec::new(APT_GET)
            .env("DEBIAN_FRONTEND", "noninteractive")
            .env("DEBIAN_PRIORITY", "critical")
    }

    /// dpkg's view of a package, or `None` if dpkg has never heard of it.
    pub fn status(&self, name: &str) -> Result<Option<PackageStatus>> {
        let cmd = CommandSpec::new(DPKG_QUERY)
            .args(["-W", "-f", "${Package}\\t${Version}\\t${Status}\\n"])
            .arg(name);
        let output = self.runner.run(&cmd)?;
        if !output.success_status() {
            return Ok(None);
        }
        Ok(output
            .stdout_str()
            .lines()
            .filter_map(PackageStatus::parse)
            .find(|s| s.name == name))
    }

    /// Package name recorded inside a `.deb` file.
    pub fn file_package_name(&self, path: &str) -> Result<String> {
        let cmd = CommandSpec::new(DPKG_DEB).args(["-f", path, "Package"]);
        let name = self.runner.run_capture(&cmd)?;
        if name.is_empty() {
            return Err(Error::Metadata {
                path: PathBuf::from(path),
                message: "empty Package field".to_string(),
            });
        }
        Ok(name)
    }

    /// Pre-answer a debconf question.
    pub fn preseed(&self, selection: &DebconfSelection) -> Result<()> {
        log::debug!("Preseeding debconf: {}", selection);
        let cmd = CommandSpec::new(DEBCONF_SET_SELECTIONS).stdin(format!("{selection}\n"));
        self.runner.run_checked(&cmd)?;
        Ok(())
    }
}

impl Backend for AptBackend<'_> {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn installed(&self, name: &str) -> Result<bool> {
        Ok(self.status(name)?.is_some_and(|s| s.is_installed()))
    }

    fn install(&self, package: &str) -> Result<bool> {
        let name = if is_local_file(package) {
            self.file_package_name(package)?
        } else {
            PackageSpec::parse(package).name
        };

        if self.installed(&name)? {
            log::debug!("Package {} already installed", name);
            return Ok(false);
        }

        log::info!("Installing {}", package);
        let cmd = self
            .apt_get()
            .args([
                "--option",
                "Dpkg::Options::=--force-confold",
                "-q",
                "-y",
                "install",
            ])
            .arg(package);
        self.runner.run_checked(&cmd)?;
        Ok(true)
    }

    fn uninstall(&self, name: &str) -> Result<bool> {
        let name = PackageSpec::parse(name).name;
        if !self.installed(&name)? {
            return Ok(false);
        }

        log::info!("Removing {}", name);
        let cmd = self.apt_get().args(["-q", "-y", "remove"]).arg(&name);
        self.runner.run_checked(&cmd)?;
        Ok(true)
    }

    fn update(&self) -> Result<()> {
        log::info!("Refreshing APT package lists");
        self.runner.run_checked(&self.apt_get().args(["-q", "update"]))?;
        Ok(())
    }
}
