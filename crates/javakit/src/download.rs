//! The download capability.
//!
//! [`HttpDownloader`] streams to `<dest>.part` and renames on success, so an
//! interrupted transfer never leaves a file that looks complete.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Upper bound on a single download (JDK media is well under this).
const MAX_DOWNLOAD_SIZE: u64 = 512 * 1024 * 1024;

const USER_AGENT: &str = concat!("javactl/", env!("CARGO_PKG_VERSION"));

/// Fetches a URL to a local file.
pub trait Downloader: Send + Sync {
    /// Download `url` to `dest`, sending the extra `headers`.
    ///
    /// Returns the path of the completed file.
    fn fetch(&self, url: &str, headers: &[(&str, &str)], dest: &Path) -> Result<PathBuf>;
}

/// Blocking HTTP downloader.
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    /// Create a downloader with default agent settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &str, headers: &[(&str, &str)], dest: &Path) -> Result<PathBuf> {
        log::info!("Downloading {}", url);

        let mut request = self.agent.get(url).header("User-Agent", USER_AGENT);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let mut response = request.call()?;

        let part = part_path(dest);
        let mut file = File::create(&part).map_err(|e| Error::io(&part, e))?;
        let mut reader = response
            .body_mut()
            .with_config()
            .limit(MAX_DOWNLOAD_SIZE)
            .reader();

        if let Err(e) = io::copy(&mut reader, &mut file) {
            let _ = fs::remove_file(&part);
            return Err(Error::Http {
                message: format!("reading body of {url}: {e}"),
                status: None,
            });
        }
        drop(file);

        fs::rename(&part, dest).map_err(|e| Error::io(dest, e))?;
        log::debug!("Saved {}", dest.display());
        Ok(dest.to_path_buf())
    }
}

/// A download request seen by [`MockDownloader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadCall {
    /// Requested URL
    pub url: String,
    /// Extra headers
    pub headers: Vec<(String, String)>,
    /// Destination file
    pub dest: PathBuf,
}

/// Downloader that writes fixed bytes and records each request.
#[derive(Debug, Default)]
pub struct MockDownloader {
    body: Vec<u8>,
    fail: bool,
    calls: Mutex<Vec<DownloadCall>>,
}

impl MockDownloader {
    /// Serve `body` for every URL.
    #[must_use]
    pub fn serving(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Fail every request with a 404.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests seen so far.
    pub fn calls(&self) -> Vec<DownloadCall> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Downloader for MockDownloader {
    fn fetch(&self, url: &str, headers: &[(&str, &str)], dest: &Path) -> Result<PathBuf> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(DownloadCall {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
                dest: dest.to_path_buf(),
            });
        if self.fail {
            return Err(Error::Http {
                message: "HTTP 404".to_string(),
                status: Some(404),
            });
        }
        fs::write(dest, &self.body).map_err(|e| Error::io(dest, e))?;
        Ok(dest.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("/tmp/jre-7u40-linux-x64.rpm")),
            PathBuf::from("/tmp/jre-7u40-linux-x64.rpm.part")
        );
    }

    #[test]
    fn test_mock_writes_and_records() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("file.rpm");
        let dl = MockDownloader::serving(b"rpm".to_vec());

        let path = dl
            .fetch("http://example.org/file.rpm", &[("Cookie", "a=b")], &dest)
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"rpm");

        let calls = dl.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].headers, [("Cookie".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn test_mock_failing() {
        let tmp = TempDir::new().unwrap();
        let dl = MockDownloader::failing();
        let err = dl
            .fetch("http://example.org/x", &[], &tmp.path().join("x"))
            .unwrap_err();
        assert!(matches!(err, Error::Http { status: Some(404), .. }));
        assert!(!tmp.path().join("x").exists());
    }
}
