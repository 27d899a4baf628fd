//! Source locators for user-selected files.

use crate::constants::FILE_SCHEME;
use crate::{FilesError, FilesResult};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Opaque identifier of a file picked by the user.
///
/// A locator is either a plain path or a `file://` URI. It is resolved to bytes and
/// metadata only through a [`crate::ContentResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocator {
    raw: String,
    path: PathBuf,
}

impl SourceLocator {
    /// Parses a locator from user input.
    ///
    /// Plain paths are taken as they are. `file://` URIs are percent-decoded and may name
    /// `localhost` as their host.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidLocator`] if the input is blank, if it uses any URI
    /// scheme other than `file`, or if a `file` URI has no path or names a remote host.
    pub fn parse(input: &str) -> FilesResult<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(FilesError::InvalidLocator("locator cannot be empty".into()));
        }

        let path = if raw.contains("://") {
            Self::file_uri_path(raw)?
        } else {
            PathBuf::from(raw)
        };

        Ok(Self {
            raw: raw.to_owned(),
            path,
        })
    }

    fn file_uri_path(raw: &str) -> FilesResult<PathBuf> {
        let url = Url::parse(raw)
            .map_err(|e| FilesError::InvalidLocator(format!("malformed URI {raw}: {e}")))?;

        if url.scheme() != FILE_SCHEME {
            return Err(FilesError::InvalidLocator(format!(
                "unsupported scheme in {raw}"
            )));
        }

        if url.path().trim_matches('/').is_empty() {
            return Err(FilesError::InvalidLocator(format!(
                "file URI has no path: {raw}"
            )));
        }

        url.to_file_path().map_err(|()| {
            FilesError::InvalidLocator(format!("file URI does not name a local file: {raw}"))
        })
    }

    /// Builds a locator directly from a filesystem path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            raw: path.to_string_lossy().into_owned(),
            path,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the last component of the decoded path.
    ///
    /// This is the fallback display name when the environment has none.
    pub fn last_segment(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_path() {
        let locator = SourceLocator::parse("scans/letter.pdf").unwrap();
        assert_eq!(locator.path(), Path::new("scans/letter.pdf"));
        assert_eq!(locator.as_str(), "scans/letter.pdf");
    }

    #[test]
    fn parses_file_uri() {
        let locator = SourceLocator::parse("file:///tmp/scan.png").unwrap();
        assert_eq!(locator.path(), Path::new("/tmp/scan.png"));
        assert_eq!(locator.to_string(), "file:///tmp/scan.png");
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(
            SourceLocator::parse("   "),
            Err(FilesError::InvalidLocator(_))
        ));
    }

    #[test]
    fn rejects_other_schemes() {
        let err = SourceLocator::parse("content://media/external/images/1").unwrap_err();
        match err {
            FilesError::InvalidLocator(msg) => assert!(msg.contains("content://")),
            other => panic!("expected InvalidLocator, got {other:?}"),
        }
    }

    #[test]
    fn rejects_file_uri_without_path() {
        assert!(SourceLocator::parse("file://").is_err());
        assert!(SourceLocator::parse("file:///").is_err());
    }

    #[test]
    fn file_uri_is_percent_decoded() {
        let locator = SourceLocator::parse("file:///sdcard/Download/my%20scan.png").unwrap();
        assert_eq!(locator.path(), Path::new("/sdcard/Download/my scan.png"));
        assert_eq!(locator.last_segment(), Some("my scan.png"));
        assert_eq!(locator.as_str(), "file:///sdcard/Download/my%20scan.png");
    }

    #[test]
    fn file_uri_accepts_localhost() {
        let locator = SourceLocator::parse("file://localhost/etc/hostname").unwrap();
        assert_eq!(locator.path(), Path::new("/etc/hostname"));
    }

    #[test]
    fn file_uri_rejects_remote_host() {
        let err = SourceLocator::parse("file://fileserver/share/scan.png").unwrap_err();
        match err {
            FilesError::InvalidLocator(msg) => assert!(msg.contains("fileserver")),
            other => panic!("expected InvalidLocator, got {other:?}"),
        }
    }

    #[test]
    fn last_segment_skips_trailing_slash() {
        let locator = SourceLocator::parse("file:///data/reports/").unwrap();
        assert_eq!(locator.last_segment(), Some("reports"));

        let locator = SourceLocator::from_path("a/b/c.jpg");
        assert_eq!(locator.last_segment(), Some("c.jpg"));
    }
}
