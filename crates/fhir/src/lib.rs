//! FHIR STU3 model and builder support for the DocRef sample.
//!
//! This crate provides **domain models**, **builders** and **wire translation** for the small
//! set of FHIR resources the sample fabricates:
//! - `Coding` / `CodeableConcept`
//! - `Attachment`
//! - `Practitioner`
//! - `DocumentReference`
//!
//! This crate focuses on:
//! - construction of fully populated resources from plain values
//! - FHIR `dateTime` and `instant` primitives
//! - serialisation to FHIR JSON (and YAML for inspection), and strict JSON parsing
//!
//! It performs no FHIR profile validation.

pub mod attachment;
pub mod datatypes;
pub mod document_reference;
pub mod practitioner;

// Re-export facades and domain-level types
pub use attachment::Attachment;
pub use datatypes::{CodeableConcept, Coding, FhirDateTime, FhirInstant};
pub use document_reference::{DocumentReference, DocumentReferenceStatus};
pub use practitioner::Practitioner;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors returned by the `fhir` crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

pub(crate) fn render_json<T: Serialize>(wire: &T) -> FhirResult<String> {
    Ok(serde_json::to_string_pretty(wire)?)
}

pub(crate) fn render_yaml<T: Serialize>(wire: &T) -> FhirResult<String> {
    Ok(serde_yaml::to_string(wire)?)
}

/// Deserialises a wire struct, reporting the path of the first mismatching field.
pub(crate) fn parse_json<T: DeserializeOwned>(json_text: &str, what: &str) -> FhirResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    serde_path_to_error::deserialize::<_, T>(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        FhirError::Translation(format!("{what} schema mismatch at {path}: {source}"))
    })
}
