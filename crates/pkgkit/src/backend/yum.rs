//! YUM backend using `yum` and `rpm`.

use crate::backend::{Backend, is_local_file};
use crate::error::{Error, Result};
use crate::types::PackageSpec;
use hostexec::{CommandRunner, CommandSpec};
use std::path::PathBuf;

const YUM: &str = "yum";
const RPM: &str = "rpm";

/// Backend for RHEL-family hosts.
pub struct YumBackend<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> YumBackend<'a> {
    /// Create a backend over `runner`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Package name recorded inside an `.rpm` file.
    pub fn file_package_name(&self, path: &str) -> Result<String> {
        let cmd = CommandSpec::new(RPM)
            .args(["-qp", "--queryformat", "%{NAME}\\n"])
            .arg(path);
        let name = self.runner.run_capture(&cmd)?;
        if name.is_empty() {
            return Err(Error::Metadata {
                path: PathBuf::from(path),
                message: "empty NAME tag".to_string(),
            });
        }
        Ok(name)
    }
}

impl Backend for YumBackend<'_> {
    fn name(&self) -> &'static str {
        "yum"
    }

    fn installed(&self, name: &str) -> Result<bool> {
        let cmd = CommandSpec::new(RPM)
            .args(["-q", "--queryformat", "%{NAME}\\n"])
            .arg(name);
        Ok(self.runner.run_status(&cmd)?)
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
        let cmd = CommandSpec::new(YUM)
            .args(["--nogpgcheck", "-y", "install"])
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
        self.runner
            .run_checked(&CommandSpec::new(YUM).args(["-y", "remove"]).arg(&name))?;
        Ok(true)
    }

    fn update(&self) -> Result<()> {
        log::info!("Refreshing YUM metadata");
        self.runner
            .run_checked(&CommandSpec::new(YUM).args(["-y", "makecache"]))?;
        Ok(())
    }
}
