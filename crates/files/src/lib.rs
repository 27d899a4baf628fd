//! DocRef File Access
//!
//! This crate provides the file-access side of the DocRef sample: turning a user-picked
//! file into raw bytes, a display name and a media type, and enforcing the data
//! restrictions that apply to attachment payloads.
//!
//! ## Design Principles
//!
//! - The environment handle ([`ContentResolver`]) is passed in per call, never held globally
//! - A source that cannot be read is reported as *absent* (`Ok(None)`), not as an error
//! - Only two restriction errors exist: unsupported file type and maximum size violation
//! - File type checks use the payload's magic bytes, not the file extension
//!
//! ## Example Usage
//!
//! ```no_run
//! use docref_files::{FileUtils, FsContentResolver, SourceLocator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = FsContentResolver::new("scans")?;
//! let locator = SourceLocator::parse("letter.pdf")?;
//!
//! let file_utils = FileUtils::default();
//! if let Some(bytes) = file_utils.get_asset(&locator, &resolver)? {
//!     println!("{} has {} bytes", file_utils.file_name(&resolver, &locator), bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

mod constants;
mod files;
mod locator;
mod resolver;

pub use constants::{DEFAULT_MAX_DATA_SIZE_BYTES, OCTET_STREAM_MEDIA_TYPE};
pub use files::{DataRestriction, FileType, FileUtils};
pub use locator::SourceLocator;
pub use resolver::{ContentResolver, FsContentResolver};

/// Domain restriction errors raised while fetching attachment bytes.
///
/// These are the only failures a caller building an attachment has to handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataRestrictionError {
    /// The payload is not one of the permitted file types.
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The payload is larger than the configured maximum.
    #[error("File size {size} bytes exceeds the maximum of {max} bytes")]
    MaxDataSizeViolation { size: u64, max: u64 },
}

/// Errors that can occur while setting up file access.
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Base directory does not exist or is not a directory
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// The locator string is empty or uses an unsupported scheme
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results that can fail with a [`FilesError`].
pub type FilesResult<T> = Result<T, FilesError>;
