//! Constants shared by the file access types.

/// Media type used when the environment cannot determine one.
pub const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";

/// Default upper bound for attachment payloads (20 MiB).
pub const DEFAULT_MAX_DATA_SIZE_BYTES: u64 = 20 * 1024 * 1024;

/// URI scheme accepted by [`crate::SourceLocator::parse`].
pub(crate) const FILE_SCHEME: &str = "file";
