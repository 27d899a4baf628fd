//! Constants used throughout the DocRef core crate.
//!
//! This module contains the fixed demonstration values and configuration keys so the
//! sample data stays consistent across the codebase.

/// Code system of the practice setting concept.
pub const IHE_PRACTICE_SETTING_SYSTEM: &str =
    "http://www.ihe.net/xds/connectathon/practiceSettingCodes";

/// Code system of the document type concept.
pub const LOINC_SYSTEM: &str = "http://loinc.org";

/// Code and display of the demonstration practice specialty.
pub const GENERAL_MEDICINE: &str = "General Medicine";

/// LOINC code of the demonstration document type.
pub const OUTPATIENT_NOTE_CODE: &str = "34108-1";

/// Display of the demonstration document type.
pub const OUTPATIENT_NOTE_DISPLAY: &str = "Outpatient Note";

/// Environment variable overriding the attachment size limit (bytes).
pub const MAX_ATTACHMENT_BYTES_ENV: &str = "DOCREF_MAX_ATTACHMENT_BYTES";

/// Environment variable overriding the base directory for source locators.
pub const SOURCE_ROOT_ENV: &str = "DOCREF_SOURCE_ROOT";

/// Base directory for source locators when nothing is configured.
pub const DEFAULT_SOURCE_ROOT: &str = ".";
