//! `JAVA_HOME` in the system environment file, and the `java`/`javac`
//! alternatives.
//!
//! The environment file is edited line-wise: only `JAVA_HOME=` definition
//! lines are ever removed or added, every other byte is written back as
//! read.

use crate::error::{Error, Result};
use hostexec::{CommandRunner, CommandSpec};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const ENV_VAR: &str = "JAVA_HOME";

/// Binaries wired through alternatives.
const MANAGED_BINARIES: &[&str] = &["java", "javac"];

static DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*JAVA_HOME\s*=(.*)$").expect("valid definition pattern"));

/// Value of a `JAVA_HOME=` line, unquoted, or `None` for other lines.
fn definition_value(line: &str) -> Option<String> {
    let line = line.trim_end_matches(['\n', '\r']);
    let caps = DEFINITION.captures(line)?;
    let value = caps[1].trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Some(value.to_string())
}

pub struct EnvironmentRegistrar<'a> {
    runner: &'a dyn CommandRunner,
    env_file: PathBuf,
    link_dir: PathBuf,
    alternatives: String,
    default_root: PathBuf,
}

impl<'a> EnvironmentRegistrar<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        env_file: impl Into<PathBuf>,
        link_dir: impl Into<PathBuf>,
        alternatives: impl Into<String>,
        default_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            env_file: env_file.into(),
            link_dir: link_dir.into(),
            alternatives: alternatives.into(),
            default_root: default_root.into(),
        }
    }

    /// Point `JAVA_HOME` and the alternatives at `home`.
    pub fn install(&self, home: &Path) -> Result<bool> {
        let mut changed = self.set_env(home)?;

        for &prog in MANAGED_BINARIES {
            let target = home.join("bin").join(prog);
            if !target.exists() {
                continue;
            }
            if self.points_to(prog, &target)? {
                log::debug!("{} already points to {}", prog, target.display());
                continue;
            }
            log::info!("Registering {} -> {}", prog, target.display());
            let link = self.link_dir.join(prog);
            self.runner.run_checked(
                &CommandSpec::new(&self.alternatives)
                    .arg("--install")
                    .path_arg(&link)
                    .arg(prog)
                    .path_arg(&target)
                    .arg("1"),
            )?;
            self.runner.run_checked(
                &CommandSpec::new(&self.alternatives)
                    .args(["--set", prog])
                    .path_arg(&target),
            )?;
            changed = true;
        }

        Ok(changed)
    }

    /// Remove `JAVA_HOME` (only the definition for `home`, when given) and
    /// every alternative under `home` or the default install root.
    pub fn uninstall(&self, home: Option<&Path>) -> Result<bool> {
        let mut changed = self.remove_env(home)?;

        let root = home.unwrap_or(&self.default_root);
        for &prog in MANAGED_BINARIES {
            for path in self.registered(prog)? {
                if !path.starts_with(root) {
                    continue;
                }
                log::info!("Removing alternative {} -> {}", prog, path.display());
                self.runner.run_checked(
                    &CommandSpec::new(&self.alternatives)
                        .args(["--remove", prog])
                        .path_arg(&path),
                )?;
                changed = true;
            }
        }

        Ok(changed)
    }

    fn read_env(&self) -> Result<String> {
        match fs::read_to_string(&self.env_file) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(Error::io(&self.env_file, e)),
        }
    }

    fn write_env(&self, content: &str) -> Result<()> {
        fs::write(&self.env_file, content).map_err(|e| Error::io(&self.env_file, e))
    }

    fn set_env(&self, home: &Path) -> Result<bool> {
        let content = self.read_env()?;
        let home = home.to_string_lossy();

        let current = content.split_inclusive('\n').filter_map(definition_value).last();
        if current.as_deref() == Some(home.as_ref()) {
            return Ok(false);
        }

        let mut kept: String = content
            .split_inclusive('\n')
            .filter(|line| definition_value(line).is_none())
            .collect();
        if !kept.is_empty() && !kept.ends_with('\n') {
            kept.push('\n');
        }
        kept.push_str(&format!("{ENV_VAR}=\"{home}\"\n"));

        log::info!("Setting {}={} in {}", ENV_VAR, home, self.env_file.display());
        self.write_env(&kept)?;
        Ok(true)
    }

    fn remove_env(&self, home: Option<&Path>) -> Result<bool> {
        let content = self.read_env()?;
        let home = home.map(|h| h.to_string_lossy().to_string());

        let doomed = |line: &str| {
            definition_value(line).is_some_and(|value| home.as_ref().is_none_or(|h| *h == value))
        };
        if !content.split_inclusive('\n').any(doomed) {
            return Ok(false);
        }

        let kept: String = content
            .split_inclusive('\n')
            .filter(|line| !doomed(line))
            .collect();
        log::info!("Removing {} from {}", ENV_VAR, self.env_file.display());
        self.write_env(&kept)?;
        Ok(true)
    }

    fn display(&self, prog: &str) -> Result<Option<String>> {
        let output = self
            .runner
            .run(&CommandSpec::new(&self.alternatives).args(["--display", prog]))?;
        if !output.success_status() {
            return Ok(None);
        }
        Ok(Some(output.combined_str()))
    }

    fn points_to(&self, prog: &str, target: &Path) -> Result<bool> {
        let expected = format!("link currently points to {}", target.display());
        Ok(self
            .display(prog)?
            .is_some_and(|text| text.lines().any(|l| l.trim() == expected)))
    }

    /// Alternative targets registered for `prog`.
    fn registered(&self, prog: &str) -> Result<Vec<PathBuf>> {
        let Some(text) = self.display(prog)? else {
            return Ok(Vec::new());
        };
        Ok(text
            .lines()
            .filter(|l| l.starts_with('/'))
            .filter_map(|l| l.split_whitespace().next())
            .map(PathBuf::from)
            .collect())
    }
}
