//! Where spec bytes come from: local files or plain HTTP(S) GETs.

use crate::error::SpecError;
use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for network sources.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A resolved source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(Url),
}

/// True if `location` names a network source.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Display name for a location: the file's base name, or the last path
/// segment of a URL (`"unknown"` when the URL does not parse).
pub fn display_name(location: &str) -> String {
    if is_remote(location) {
        return match Url::parse(location.trim()) {
            Ok(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or_default()
                .to_string(),
            Err(_) => "unknown".to_string(),
        };
    }
    Path::new(location)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| location.to_string())
}

impl Source {
    /// Interprets a location string as a URL or a filesystem path.
    pub fn parse(location: &str) -> Result<Self, SpecError> {
        if is_remote(location) {
            let url = Url::parse(location.trim()).map_err(|e| SpecError::Fetch {
                location: location.to_string(),
                message: format!("invalid URL: {e}"),
            })?;
            Ok(Source::Url(url))
        } else {
            Ok(Source::File(PathBuf::from(location)))
        }
    }

    /// Resolves `target` (a `$ref` file part) against this source.
    ///
    /// Absolute URLs stand on their own; anything else is relative to the
    /// directory (or URL) of this source.
    pub fn join(&self, target: &str) -> Result<Self, SpecError> {
        if is_remote(target) {
            return Source::parse(target);
        }
        match self {
            Source::File(path) => {
                let target = Path::new(target);
                if target.is_absolute() {
                    return Ok(Source::File(target.to_path_buf()));
                }
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Source::File(base.join(target)))
            }
            Source::Url(url) => url.join(target).map(Source::Url).map_err(|e| SpecError::Fetch {
                location: target.to_string(),
                message: format!("cannot join with {url}: {e}"),
            }),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Reads the raw bytes behind a [`Source`].
pub trait SourceLoader: Send + Sync {
    fn load(&self, source: &Source) -> Result<Vec<u8>, SpecError>;
}

/// Reads files from disk and fetches URLs with a bounded blocking GET.
///
/// No authentication is sent and no retries are made.
#[derive(Debug, Clone)]
pub struct DefaultLoader {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl DefaultLoader {
    pub fn new(timeout: Duration) -> Result<Self, SpecError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SpecError::Fetch {
                location: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn fetch(&self, url: &Url) -> Result<Vec<u8>, SpecError> {
        let location = url.to_string();
        tracing::debug!(target: "oasprobe::source", %location, "fetching network source");
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                SpecError::Timeout {
                    location: location.clone(),
                    secs: self.timeout.as_secs(),
                }
            } else {
                SpecError::Fetch {
                    location: location.clone(),
                    message: e.to_string(),
                }
            }
        };
        let response = self.client.get(url.clone()).send().map_err(&map_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SpecError::Fetch {
                location: location.clone(),
                message: format!("HTTP {status}"),
            });
        }
        let body = response.bytes().map_err(map_err)?;
        Ok(body.to_vec())
    }
}

impl SourceLoader for DefaultLoader {
    fn load(&self, source: &Source) -> Result<Vec<u8>, SpecError> {
        match source {
            Source::File(path) => std::fs::read(path).map_err(|e| SpecError::Io {
                location: path.display().to_string(),
                source: e,
            }),
            Source::Url(url) => self.fetch(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn names_come_from_file_or_url() {
        assert_eq!(display_name("/srv/app/src/main/api/user_api.yaml"), "user_api.yaml");
        assert_eq!(
            display_name("https://petstore3.swagger.io/api/v3/openapi.json"),
            "openapi.json"
        );
        assert_eq!(display_name("https://host/"), "");
        assert_eq!(display_name("http://[::bad"), "unknown");
    }

    #[test]
    fn remote_detection_is_scheme_based() {
        assert!(is_remote("https://x/y.yaml"));
        assert!(is_remote("HTTP://x/y.yaml"));
        assert!(!is_remote("/tmp/http.yaml"));
        assert!(!is_remote("file:///tmp/x.yaml"));
    }

    #[test]
    fn join_is_relative_to_the_source_directory() {
        let base = Source::parse("/srv/api/openapi.yaml").unwrap();
        assert_eq!(
            base.join("models/pet.yaml").unwrap(),
            Source::File(PathBuf::from("/srv/api/models/pet.yaml"))
        );
        assert_eq!(
            base.join("/abs/common.yaml").unwrap(),
            Source::File(PathBuf::from("/abs/common.yaml"))
        );

        let remote = Source::parse("https://h/specs/v1/openapi.yaml").unwrap();
        assert_eq!(
            remote.join("../common.yaml").unwrap().to_string(),
            "https://h/specs/common.yaml"
        );
        assert_eq!(
            base.join("https://cdn/x.json").unwrap().to_string(),
            "https://cdn/x.json"
        );
    }

    #[test]
    fn loader_reads_files_and_reports_missing_ones() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a.yaml");
        std::fs::write(&path, "openapi: 3.0.0").unwrap();
        let loader = DefaultLoader::new(DEFAULT_FETCH_TIMEOUT).unwrap();
        assert_eq!(
            loader.load(&Source::File(path)).unwrap(),
            b"openapi: 3.0.0".to_vec()
        );

        let missing = tmp.path().join("missing.yaml");
        let err = loader.load(&Source::File(missing)).unwrap_err();
        assert!(matches!(err, SpecError::Io { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }
}
