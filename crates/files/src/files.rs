//! Attachment payload retrieval and data restriction checks
//!
//! [`FileUtils`] is the file-access collaborator used when building attachments. It fetches
//! the bytes behind a [`SourceLocator`] through a [`ContentResolver`] and enforces the
//! [`DataRestriction`] policy on them.
//!
//! # Absent vs. failed
//!
//! - A locator that cannot be read yields `Ok(None)`: there is simply no attachment
//! - A payload that breaks the policy yields a [`DataRestrictionError`]
//!
//! # Checks
//!
//! The size limit is checked before the file type, so an oversized payload always reports
//! [`DataRestrictionError::MaxDataSizeViolation`]. When the resolver knows the content length
//! the limit is enforced before anything is read; otherwise at most one byte past the limit is
//! read, and the reported size is that truncated length. The file type is detected from the
//! payload's magic bytes; an undetectable type is treated as unsupported.

use crate::constants::DEFAULT_MAX_DATA_SIZE_BYTES;
use crate::{ContentResolver, DataRestrictionError, SourceLocator};

/// File types accepted as attachment payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Jpeg,
    Png,
    Tiff,
    Dcm,
    Pdf,
}

impl FileType {
    /// All supported file types.
    pub const ALL: [FileType; 5] = [
        FileType::Jpeg,
        FileType::Png,
        FileType::Tiff,
        FileType::Dcm,
        FileType::Pdf,
    ];

    /// Canonical media type for this file type.
    pub fn mime_type(self) -> &'static str {
        match self {
            FileType::Jpeg => "image/jpeg",
            FileType::Png => "image/png",
            FileType::Tiff => "image/tiff",
            FileType::Dcm => "application/dicom",
            FileType::Pdf => "application/pdf",
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mime_type() == mime)
    }

    /// Detects the file type from the payload's leading bytes.
    ///
    /// Returns `Err` with the detected media type when the payload is recognised but not one
    /// of the supported types, or `"unknown"` when nothing matches.
    pub fn detect(data: &[u8]) -> Result<Self, String> {
        match infer::get(data) {
            Some(kind) => Self::from_mime(kind.mime_type()).ok_or_else(|| kind.mime_type().into()),
            None => Err("unknown".into()),
        }
    }
}

/// Restriction policy for attachment payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRestriction {
    max_size_bytes: u64,
    allowed_types: Vec<FileType>,
}

impl DataRestriction {
    pub fn new(max_size_bytes: u64, allowed_types: Vec<FileType>) -> Self {
        Self {
            max_size_bytes,
            allowed_types,
        }
    }

    #[must_use]
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    #[must_use]
    pub fn allowed_types(&self) -> &[FileType] {
        &self.allowed_types
    }

    /// Checks a payload length against the size limit.
    ///
    /// # Errors
    ///
    /// [`DataRestrictionError::MaxDataSizeViolation`] if `size` exceeds the limit.
    pub fn check_size(&self, size: u64) -> Result<(), DataRestrictionError> {
        if size > self.max_size_bytes {
            return Err(DataRestrictionError::MaxDataSizeViolation {
                size,
                max: self.max_size_bytes,
            });
        }
        Ok(())
    }

    /// Checks a payload against the policy.
    ///
    /// # Errors
    ///
    /// - [`DataRestrictionError::MaxDataSizeViolation`] if the payload is too large
    /// - [`DataRestrictionError::UnsupportedFileType`] if its type is not allowed
    pub fn check(&self, data: &[u8]) -> Result<FileType, DataRestrictionError> {
        self.check_size(data.len() as u64)?;

        let file_type = FileType::detect(data).map_err(DataRestrictionError::UnsupportedFileType)?;
        if !self.allowed_types.contains(&file_type) {
            return Err(DataRestrictionError::UnsupportedFileType(
                file_type.mime_type().into(),
            ));
        }

        Ok(file_type)
    }
}

impl Default for DataRestriction {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DATA_SIZE_BYTES, FileType::ALL.to_vec())
    }
}

/// File-access helper used by the sample data builder.
#[derive(Debug, Clone, Default)]
pub struct FileUtils {
    restriction: DataRestriction,
}

impl FileUtils {
    pub fn new(restriction: DataRestriction) -> Self {
        Self { restriction }
    }

    #[must_use]
    pub fn restriction(&self) -> &DataRestriction {
        &self.restriction
    }

    /// Fetches the bytes behind `locator`, enforcing the restriction policy.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the resolver cannot read the locator; `Ok(Some(bytes))` for an
    /// acceptable payload.
    ///
    /// # Errors
    ///
    /// Returns [`DataRestrictionError`] when the payload breaks the policy.
    pub fn get_asset(
        &self,
        locator: &SourceLocator,
        resolver: &dyn ContentResolver,
    ) -> Result<Option<Vec<u8>>, DataRestrictionError> {
        if let Some(size) = resolver.content_length(locator) {
            self.restriction
                .check_size(size)
                .map_err(|e| rejected(locator, e))?;
        }

        let limit = self.restriction.max_size_bytes().saturating_add(1);
        let data = match resolver.open(locator, limit) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(%locator, error = %e, "source could not be read");
                return Ok(None);
            }
        };

        let file_type = self
            .restriction
            .check(&data)
            .map_err(|e| rejected(locator, e))?;

        tracing::debug!(%locator, size = data.len(), ?file_type, "source accepted");
        Ok(Some(data))
    }

    /// Display name for `locator`, falling back to its last segment.
    pub fn file_name(&self, resolver: &dyn ContentResolver, locator: &SourceLocator) -> String {
        resolver
            .display_name(locator)
            .or_else(|| locator.last_segment().map(str::to_owned))
            .unwrap_or_else(|| locator.to_string())
    }
}

fn rejected(locator: &SourceLocator, error: DataRestrictionError) -> DataRestrictionError {
    tracing::warn!(%locator, %error, "source rejected by data restriction");
    error
}
