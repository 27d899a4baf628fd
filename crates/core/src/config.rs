//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the sample data builder. Operations never read process-wide environment
//! variables themselves; the binary reads them and hands the raw values to the helpers here.

use crate::constants::{DEFAULT_SOURCE_ROOT, MAX_ATTACHMENT_BYTES_ENV};
use crate::{ConfigError, ConfigResult, SampleDataBuilder};
use docref_files::{
    DataRestriction, FileType, FileUtils, FsContentResolver, DEFAULT_MAX_DATA_SIZE_BYTES,
};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleConfig {
    max_attachment_bytes: u64,
    source_root: PathBuf,
}

impl SampleConfig {
    /// Create a new `SampleConfig`.
    pub fn new(max_attachment_bytes: u64, source_root: PathBuf) -> ConfigResult<Self> {
        if max_attachment_bytes == 0 {
            return Err(ConfigError::InvalidInput(
                "max_attachment_bytes must be greater than zero".into(),
            ));
        }

        Ok(Self {
            max_attachment_bytes,
            source_root,
        })
    }

    /// Build the configuration from optional raw values (typically environment variables).
    pub fn from_values(
        max_attachment_bytes: Option<String>,
        source_root: Option<String>,
    ) -> ConfigResult<Self> {
        Self::new(
            max_attachment_bytes_from_env_value(max_attachment_bytes)?,
            source_root_from_env_value(source_root),
        )
    }

    /// Replace the source root, e.g. with a command-line override.
    #[must_use]
    pub fn with_source_root(mut self, source_root: PathBuf) -> Self {
        self.source_root = source_root;
        self
    }

    pub fn max_attachment_bytes(&self) -> u64 {
        self.max_attachment_bytes
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// File access helper enforcing this configuration's size limit.
    pub fn file_utils(&self) -> FileUtils {
        FileUtils::new(DataRestriction::new(
            self.max_attachment_bytes,
            FileType::ALL.to_vec(),
        ))
    }

    /// Sample data builder using [`Self::file_utils`].
    pub fn builder(&self) -> SampleDataBuilder {
        SampleDataBuilder::new(self.file_utils())
    }

    /// Filesystem resolver rooted at the configured source root.
    pub fn resolver(&self) -> ConfigResult<FsContentResolver> {
        Ok(FsContentResolver::new(&self.source_root)?)
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            max_attachment_bytes: DEFAULT_MAX_DATA_SIZE_BYTES,
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
        }
    }
}

/// Parse the attachment size limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default limit of 20 MiB.
pub fn max_attachment_bytes_from_env_value(value: Option<String>) -> ConfigResult<u64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_MAX_DATA_SIZE_BYTES),
        Some(v) => v.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
            key: MAX_ATTACHMENT_BYTES_ENV,
            value: v.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Resolve the source root from an optional string value, defaulting to the working directory.
pub fn source_root_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_ROOT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_values_are_missing() {
        let config = SampleConfig::from_values(None, None).unwrap();
        assert_eq!(config, SampleConfig::default());
        assert_eq!(config.max_attachment_bytes(), 20 * 1024 * 1024);
        assert_eq!(config.source_root(), Path::new("."));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = SampleConfig::from_values(Some("  ".into()), Some("".into())).unwrap();
        assert_eq!(config, SampleConfig::default());
    }

    #[test]
    fn parses_explicit_values() {
        let config =
            SampleConfig::from_values(Some(" 1024 ".into()), Some("/srv/scans".into())).unwrap();
        assert_eq!(config.max_attachment_bytes(), 1024);
        assert_eq!(config.source_root(), Path::new("/srv/scans"));
        assert_eq!(config.file_utils().restriction().max_size_bytes(), 1024);
    }

    #[test]
    fn rejects_non_numeric_limit() {
        let err = SampleConfig::from_values(Some("lots".into()), None).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value, .. } => {
                assert_eq!(key, MAX_ATTACHMENT_BYTES_ENV);
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidValue error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(matches!(
            SampleConfig::from_values(Some("0".into()), None),
            Err(ConfigError::InvalidInput(_))
        ));
    }

    #[test]
    fn source_root_override_wins() {
        let config = SampleConfig::default().with_source_root(PathBuf::from("/tmp"));
        assert_eq!(config.source_root(), Path::new("/tmp"));
    }

    #[test]
    fn resolver_requires_existing_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = SampleConfig::default().with_source_root(temp.path().join("missing"));
        assert!(matches!(config.resolver(), Err(ConfigError::Files(_))));

        let config = SampleConfig::default().with_source_root(temp.path().to_path_buf());
        assert!(config.resolver().is_ok());
    }
}
