//! Environment handles that resolve source locators.
//!
//! A [`ContentResolver`] is the environment the sample runs in: it knows how to open a
//! locator, what media type the environment associates with it, and which name to show the
//! user. Callers borrow a resolver for the duration of a single operation.

use crate::{FilesError, FilesResult, SourceLocator};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Resolves [`SourceLocator`]s to content and metadata.
pub trait ContentResolver {
    /// Length of the content behind the locator, if known without reading it.
    fn content_length(&self, _locator: &SourceLocator) -> Option<u64> {
        None
    }

    /// Reads the content behind the locator, stopping after `limit` bytes.
    fn open(&self, locator: &SourceLocator, limit: u64) -> io::Result<Vec<u8>>;

    /// Media type the environment associates with the locator, if any.
    fn media_type(&self, locator: &SourceLocator) -> Option<String>;

    /// Human readable name of the locator, if the environment knows one.
    fn display_name(&self, locator: &SourceLocator) -> Option<String>;
}

/// Filesystem-backed resolver.
///
/// Relative locators are resolved against a base directory; absolute locators are used as
/// they are. Media types are guessed from the file extension.
#[derive(Debug, Clone)]
pub struct FsContentResolver {
    base_directory: PathBuf,
}

impl FsContentResolver {
    /// Creates a resolver rooted at `base_directory`.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidRootDirectory`] if the directory does not exist, is not a
    /// directory, or cannot be canonicalised.
    pub fn new(base_directory: impl AsRef<Path>) -> FilesResult<Self> {
        let base_directory = base_directory.as_ref();

        if !base_directory.exists() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                base_directory.display()
            )));
        }

        if !base_directory.is_dir() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                base_directory.display()
            )));
        }

        let base_directory = base_directory.canonicalize().map_err(|e| {
            FilesError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                base_directory.display(),
                e
            ))
        })?;

        Ok(Self { base_directory })
    }

    #[must_use]
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Maps a locator to the filesystem path it refers to.
    #[must_use]
    pub fn resolve(&self, locator: &SourceLocator) -> PathBuf {
        let path = locator.path();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_directory.join(path)
        }
    }
}

impl ContentResolver for FsContentResolver {
    fn content_length(&self, locator: &SourceLocator) -> Option<u64> {
        fs::metadata(self.resolve(locator))
            .ok()
            .filter(|metadata| metadata.is_file())
            .map(|metadata| metadata.len())
    }

    fn open(&self, locator: &SourceLocator, limit: u64) -> io::Result<Vec<u8>> {
        let path = self.resolve(locator);
        let wrap = |e: io::Error| {
            io::Error::new(
                e.kind(),
                format!("Failed to read source file {}: {}", path.display(), e),
            )
        };

        let mut data = Vec::new();
        File::open(&path)
            .and_then(|file| file.take(limit).read_to_end(&mut data))
            .map_err(wrap)?;
        Ok(data)
    }

    fn media_type(&self, locator: &SourceLocator) -> Option<String> {
        mime_guess::from_path(self.resolve(locator))
            .first_raw()
            .map(str::to_owned)
    }

    fn display_name(&self, locator: &SourceLocator) -> Option<String> {
        let path = self.resolve(locator);
        if !path.is_file() {
            return None;
        }
        path.file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = FsContentResolver::new(temp.path().join("missing"));
        assert!(matches!(result, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn new_rejects_file_as_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "not a directory").unwrap();

        let result = FsContentResolver::new(&file);
        assert!(matches!(result, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn resolves_relative_and_absolute_locators() {
        let temp = TempDir::new().unwrap();
        let resolver = FsContentResolver::new(temp.path()).unwrap();

        let relative = SourceLocator::parse("scans/a.png").unwrap();
        assert!(resolver
            .resolve(&relative)
            .starts_with(resolver.base_directory()));

        let absolute = SourceLocator::parse("file:///etc/hosts").unwrap();
        assert_eq!(resolver.resolve(&absolute), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn opens_existing_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("note.txt"), b"Hello, World!").unwrap();
        let resolver = FsContentResolver::new(temp.path()).unwrap();

        let bytes = resolver
            .open(&SourceLocator::parse("note.txt").unwrap(), 1024)
            .unwrap();
        assert_eq!(bytes, b"Hello, World!");
    }

    #[test]
    fn open_stops_at_limit() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("note.txt"), b"Hello, World!").unwrap();
        let resolver = FsContentResolver::new(temp.path()).unwrap();

        let bytes = resolver
            .open(&SourceLocator::parse("note.txt").unwrap(), 5)
            .unwrap();
        assert_eq!(bytes, b"Hello");
    }

    #[test]
    fn content_length_reads_metadata() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("note.txt"), b"Hello, World!").unwrap();
        let resolver = FsContentResolver::new(temp.path()).unwrap();

        let present = SourceLocator::parse("note.txt").unwrap();
        assert_eq!(resolver.content_length(&present), Some(13));

        let missing = SourceLocator::parse("missing.txt").unwrap();
        assert_eq!(resolver.content_length(&missing), None);
    }

    #[test]
    fn open_missing_file_reports_not_found() {
        let temp = TempDir::new().unwrap();
        let resolver = FsContentResolver::new(temp.path()).unwrap();

        let err = resolver
            .open(&SourceLocator::parse("missing.pdf").unwrap(), 1024)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn media_type_follows_extension() {
        let temp = TempDir::new().unwrap();
        let resolver = FsContentResolver::new(temp.path()).unwrap();

        let pdf = SourceLocator::parse("letter.pdf").unwrap();
        assert_eq!(resolver.media_type(&pdf).as_deref(), Some("application/pdf"));

        let unknown = SourceLocator::parse("scan.zz9unknown").unwrap();
        assert_eq!(resolver.media_type(&unknown), None);
    }

    #[test]
    fn display_name_only_for_existing_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("scan.png"), [0u8; 4]).unwrap();
        let resolver = FsContentResolver::new(temp.path()).unwrap();

        let present = SourceLocator::parse("scan.png").unwrap();
        assert_eq!(resolver.display_name(&present).as_deref(), Some("scan.png"));

        let missing = SourceLocator::parse("other.png").unwrap();
        assert_eq!(resolver.display_name(&missing), None);
    }
}
