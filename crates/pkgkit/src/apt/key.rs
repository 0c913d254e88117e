//! APT signing keys via `apt-key`

use crate::error::Result;
use hostexec::{CommandRunner, CommandSpec};

const APT_KEY: &str = "apt-key";

/// Default keyserver for `apt-key adv --recv-keys`.
pub const DEFAULT_KEYSERVER: &str = "keys.gnupg.net";

/// Signing keys in APT's trusted keyring.
pub struct AptKey<'a> {
    runner: &'a dyn CommandRunner,
    keyserver: String,
}

impl<'a> AptKey<'a> {
    /// Create a key manager fetching from `keyserver`.
    pub fn new(runner: &'a dyn CommandRunner, keyserver: impl Into<String>) -> Self {
        Self {
            runner,
            keyserver: keyserver.into(),
        }
    }

    /// Whether `apt-key list` mentions `id`.
    pub fn installed(&self, id: &str) -> Result<bool> {
        let output = self.runner.run(&CommandSpec::new(APT_KEY).arg("list"))?;
        let listing = output.stdout_str().to_uppercase();
        Ok(listing.contains(&id.to_uppercase()))
    }

    /// Receive `id` from the keyserver unless it is already trusted.
    pub fn install(&self, id: &str) -> Result<bool> {
        if self.installed(id)? {
            return Ok(false);
        }
        log::info!("Receiving key {} from {}", id, self.keyserver);
        let cmd = CommandSpec::new(APT_KEY)
            .args(["adv", "--keyserver", self.keyserver.as_str(), "--recv-keys", id]);
        self.runner.run_checked(&cmd)?;
        Ok(true)
    }

    /// Delete `id` if it is trusted.
    pub fn uninstall(&self, id: &str) -> Result<bool> {
        if !self.installed(id)? {
            return Ok(false);
        }
        log::info!("Deleting key {}", id);
        self.runner
            .run_checked(&CommandSpec::new(APT_KEY).args(["del", id]))?;
        Ok(true)
    }
}
