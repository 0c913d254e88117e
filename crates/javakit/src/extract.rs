//! One-shot unpacking of vendor media.
//!
//! Only vendor-named `.tar.gz` archives and `.bin` self-extractors are
//! unpacked. Both produce `{variant}{1.major.minor_release}` under the
//! destination directory; when that directory already exists nothing runs.

use crate::error::{Error, Result};
use crate::version::JavaVersion;
use flate2::read::GzDecoder;
use hostexec::{CommandRunner, CommandSpec};
use regex::Regex;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tar::Archive;

static VENDOR_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)-(\w+)-linux-(\w+)((?:\.|-).+)$").expect("valid vendor file pattern")
});

/// Result of [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Extracted directory, or the input path if nothing needed unpacking
    pub path: PathBuf,
    /// Whether anything was unpacked
    pub changed: bool,
}

/// Directory name a vendor file unpacks to, if it is an unpackable file.
fn unpacked_name(file_name: &str) -> Option<(String, Kind)> {
    let caps = VENDOR_FILE.captures(file_name)?;
    let kind = match &caps[4] {
        ".tar.gz" => Kind::TarGz,
        ".bin" => Kind::SelfExtracting,
        _ => return None,
    };
    let version = JavaVersion::parse(&caps[2])?;
    Some((format!("{}{}", &caps[1], version.format_version()), kind))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    TarGz,
    SelfExtracting,
}

/// Unpack `source` into `dest_dir`.
///
/// # Errors
///
/// Fails if `dest_dir` is not a directory, unpacking fails, or the expected
/// directory is missing afterwards.
pub fn extract(source: &Path, dest_dir: &Path, runner: &dyn CommandRunner) -> Result<Extracted> {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let Some((dir_name, kind)) = unpacked_name(&file_name) else {
        return Ok(Extracted {
            path: source.to_path_buf(),
            changed: false,
        });
    };

    if !dest_dir.is_dir() {
        return Err(Error::Extraction {
            path: source.to_path_buf(),
            message: format!("{} is not a directory", dest_dir.display()),
        });
    }

    let dest = dest_dir.join(&dir_name);
    if dest.exists() {
        log::debug!("{} already extracted", dest.display());
        return Ok(Extracted {
            path: dest,
            changed: false,
        });
    }

    log::info!("Extracting {} into {}", source.display(), dest_dir.display());
    match kind {
        Kind::TarGz => unpack_tar_gz(source, dest_dir)?,
        Kind::SelfExtracting => run_self_extracting(source, dest_dir, runner)?,
    }

    if !dest.exists() {
        return Err(Error::Extraction {
            path: source.to_path_buf(),
            message: format!("{} was not created", dest.display()),
        });
    }

    Ok(Extracted {
        path: dest,
        changed: true,
    })
}

fn unpack_tar_gz(source: &Path, dest_dir: &Path) -> Result<()> {
    let file = File::open(source).map_err(|e| Error::io(source, e))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.set_preserve_permissions(true);
    archive.unpack(dest_dir).map_err(|e| Error::Extraction {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

fn run_self_extracting(source: &Path, dest_dir: &Path, runner: &dyn CommandRunner) -> Result<()> {
    make_executable(source)?;
    let cmd = CommandSpec::new(source.to_string_lossy())
        .current_dir(dest_dir)
        .stdin("yes\n");
    runner.run_checked(&cmd)?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
