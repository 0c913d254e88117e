//! APT repository presence and `add-apt-repository` management

use crate::backend::{Backend, apt::AptBackend};
use crate::error::{Error, Result};
use crate::types::RepoSpec;
use hostexec::CommandSpec;
use std::fs;
use std::path::{Path, PathBuf};

const ADD_APT_REPOSITORY: &str = "add-apt-repository";
const PPA_SERVER: &str = "http://ppa.launchpad.net/";
const DEFAULT_HELPER_PACKAGE: &str = "python-software-properties";

/// Where APT reads its source lines from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcesConfig {
    /// Main sources file
    pub sources_list: PathBuf,
    /// Directory of `*.list` fragments
    pub sources_dir: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            sources_list: PathBuf::from("/etc/apt/sources.list"),
            sources_dir: PathBuf::from("/etc/apt/sources.list.d"),
        }
    }
}

impl SourcesConfig {
    /// Every active (non-blank, non-comment) line across all source files.
    pub fn active_lines(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        if self.sources_list.is_file() {
            files.push(self.sources_list.clone());
        }
        if self.sources_dir.is_dir() {
            let entries =
                fs::read_dir(&self.sources_dir).map_err(|e| Error::io(&self.sources_dir, e))?;
            let mut fragments: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "list"))
                .collect();
            fragments.sort();
            files.extend(fragments);
        }

        let mut lines = Vec::new();
        for file in &files {
            lines.extend(read_active_lines(file)?);
        }
        Ok(lines)
    }
}

fn read_active_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}

/// Whether a single sources line provides `spec`.
fn line_matches(line: &str, spec: &RepoSpec) -> bool {
    match spec {
        RepoSpec::Line(text) => line == text.trim(),
        RepoSpec::Ppa(handle) => {
            let prefix = format!("{PPA_SERVER}{handle}/");
            let mut fields = line.split_whitespace();
            if !matches!(fields.next(), Some("deb" | "deb-src")) {
                return false;
            }
            fields
                .find(|f| !f.starts_with('['))
                .is_some_and(|uri| uri.starts_with(&prefix))
        }
    }
}

/// APT repositories managed through `add-apt-repository`.
pub struct AptRepository<'a> {
    apt: AptBackend<'a>,
    sources: SourcesConfig,
    assume_yes: bool,
    helper_package: String,
}

impl<'a> AptRepository<'a> {
    /// Create a manager reading `sources` and driving the host through `apt`.
    pub fn new(apt: AptBackend<'a>, sources: SourcesConfig) -> Self {
        Self {
            apt,
            sources,
            assume_yes: false,
            helper_package: DEFAULT_HELPER_PACKAGE.to_string(),
        }
    }

    /// Pass `-y` to `add-apt-repository`.
    ///
    /// See [`crate::Distribution::add_apt_repository_needs_yes`].
    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Package that provides `add-apt-repository`.
    #[must_use]
    pub fn helper_package(mut self, name: impl Into<String>) -> Self {
        self.helper_package = name.into();
        self
    }

    /// Whether any active sources line provides `spec`.
    pub fn installed(&self, spec: &RepoSpec) -> Result<bool> {
        Ok(self
            .sources
            .active_lines()?
            .iter()
            .any(|line| line_matches(line, spec)))
    }

    /// Add `spec` and refresh the index, unless it is already present.
    pub fn install(&self, spec: &RepoSpec) -> Result<bool> {
        if self.installed(spec)? {
            log::debug!("Repository {} already present", spec);
            return Ok(false);
        }
        log::info!("Adding repository {}", spec);
        self.run_tool(spec, false)?;
        Ok(true)
    }

    /// Remove `spec` and refresh the index, if it is present.
    pub fn uninstall(&self, spec: &RepoSpec) -> Result<bool> {
        if !self.installed(spec)? {
            return Ok(false);
        }
        log::info!("Removing repository {}", spec);
        self.run_tool(spec, true)?;
        Ok(true)
    }

    fn run_tool(&self, spec: &RepoSpec, remove: bool) -> Result<()> {
        self.apt.install(&self.helper_package)?;

        let mut cmd = CommandSpec::new(ADD_APT_REPOSITORY);
        if self.assume_yes {
            cmd = cmd.arg("-y");
        }
        if remove {
            cmd = cmd.arg("--remove");
        }
        self.apt.runner().run_checked(&cmd.arg(spec.to_string()))?;
        self.apt.update()
    }
}
