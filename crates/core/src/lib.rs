//! # DocRef Core
//!
//! Sample data builder for the DocRef demonstration app.
//!
//! This crate contains the data-shaping layer only:
//! - Fixed demonstration resources (practitioner, practice specialty, document type)
//! - Attachments built from user-picked files via the `docref_files` collaborator
//! - Document references composed from the above, indexed at call time
//! - Startup configuration (`SampleConfig`)
//!
//! **No I/O of its own**: file access lives in `docref_files`, FHIR modelling in `fhir`, and
//! the command-line surface in `docref-cli`.

pub mod config;
pub mod constants;
pub mod datetime;
mod error;
mod sample_data;

pub use config::SampleConfig;
pub use error::{ConfigError, ConfigResult};
pub use sample_data::SampleDataBuilder;

// Re-export the collaborator types callers need alongside the builder.
pub use docref_files::{ContentResolver, DataRestrictionError, FsContentResolver, SourceLocator};
