//! FHIR-aligned document reference model, builder and wire translation.
//!
//! This module provides both the domain-level document reference and its STU3 wire form.
//!
//! Responsibilities:
//! - Compose a document reference from already built parts
//! - Translate the author into a contained `Practitioner` plus a local reference
//! - Parse and render strictly, rejecting unknown keys
//!
//! Notes:
//! - The document title is carried in `description`
//! - Each attachment becomes one `content` entry
//! - The practice specialty lives in `context.practiceSetting`

use crate::attachment::AttachmentWire;
use crate::practitioner::PractitionerWire;
use crate::{Attachment, CodeableConcept, FhirError, FhirInstant, FhirResult, Practitioner};
use serde::{Deserialize, Serialize};

const RESOURCE_TYPE: &str = "DocumentReference";

/// Id of the contained author resource.
const AUTHOR_CONTAINED_ID: &str = "practitioner";

// ============================================================================
// Public domain-level types
// ============================================================================

/// Status of a document reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentReferenceStatus {
    /// This is the current reference for this document.
    Current,
    /// This reference has been superseded by another reference.
    Superseded,
    /// This reference was created in error.
    EnteredInError,
}

impl DocumentReferenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentReferenceStatus::Current => "current",
            DocumentReferenceStatus::Superseded => "superseded",
            DocumentReferenceStatus::EnteredInError => "entered-in-error",
        }
    }
}

/// Domain-level carrier for a document reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentReference {
    /// Human readable title of the document.
    pub title: String,

    /// When this reference was created.
    pub indexed: FhirInstant,

    pub status: DocumentReferenceStatus,

    /// Payloads of the document, in order.
    pub attachments: Vec<Attachment>,

    /// Kind of document (LOINC if possible).
    pub doc_type: CodeableConcept,

    /// Who authored the document.
    pub author: Practitioner,

    /// Clinical specialty of the practice that produced the document.
    pub practice_speciality: CodeableConcept,
}

// ============================================================================
// Public DocumentReference operations
// ============================================================================

impl DocumentReference {
    /// Build a document reference from its parts.
    pub fn build_with(
        title: impl Into<String>,
        indexed: FhirInstant,
        status: DocumentReferenceStatus,
        attachments: Vec<Attachment>,
        doc_type: CodeableConcept,
        author: Practitioner,
        practice_speciality: CodeableConcept,
    ) -> Self {
        Self {
            title: title.into(),
            indexed,
            status,
            attachments,
            doc_type,
            author,
            practice_speciality,
        }
    }

    /// Render the document reference as FHIR JSON.
    pub fn render_json(&self) -> FhirResult<String> {
        crate::render_json(&domain_to_wire(self))
    }

    /// Render the document reference as YAML.
    pub fn render_yaml(&self) -> FhirResult<String> {
        crate::render_yaml(&domain_to_wire(self))
    }

    /// Parse a document reference from FHIR JSON.
    ///
    /// This uses `serde_path_to_error` to surface the path of the failing field when the
    /// JSON does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the JSON does not represent a valid document reference,
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - resourceType is not "DocumentReference",
    /// - the author reference does not resolve to a contained practitioner.
    pub fn parse_json(json_text: &str) -> FhirResult<Self> {
        let wire: DocumentReferenceWire = crate::parse_json(json_text, RESOURCE_TYPE)?;

        if wire.resource_type != RESOURCE_TYPE {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType '{RESOURCE_TYPE}', got '{}'",
                wire.resource_type
            )));
        }

        wire_to_domain(wire)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct DocumentReferenceWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contained: Vec<PractitionerWire>,

    pub status: DocumentReferenceStatus,

    #[serde(rename = "type")]
    pub doc_type: CodeableConcept,

    pub indexed: FhirInstant,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<ReferenceWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ReferenceWire {
    pub reference: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ContentWire {
    pub attachment: AttachmentWire,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ContextWire {
    #[serde(rename = "practiceSetting", skip_serializing_if = "Option::is_none")]
    pub practice_setting: Option<CodeableConcept>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn domain_to_wire(data: &DocumentReference) -> DocumentReferenceWire {
    DocumentReferenceWire {
        resource_type: RESOURCE_TYPE.to_string(),
        contained: vec![PractitionerWire::from_domain(
            &data.author,
            Some(AUTHOR_CONTAINED_ID),
        )],
        status: data.status,
        doc_type: data.doc_type.clone(),
        indexed: data.indexed,
        author: vec![ReferenceWire {
            reference: format!("#{AUTHOR_CONTAINED_ID}"),
        }],
        description: Some(data.title.clone()),
        content: data
            .attachments
            .iter()
            .map(|attachment| ContentWire {
                attachment: AttachmentWire::from(attachment),
            })
            .collect(),
        context: Some(ContextWire {
            practice_setting: Some(data.practice_speciality.clone()),
        }),
    }
}

fn wire_to_domain(wire: DocumentReferenceWire) -> FhirResult<DocumentReference> {
    let reference = wire
        .author
        .first()
        .map(|r| r.reference.as_str())
        .ok_or_else(|| FhirError::Translation("DocumentReference has no author".into()))?;

    let contained_id = reference.strip_prefix('#').ok_or_else(|| {
        FhirError::Translation(format!(
            "Author reference must point to a contained resource, got '{reference}'"
        ))
    })?;

    let author = wire
        .contained
        .into_iter()
        .find(|c| c.id.as_deref() == Some(contained_id))
        .ok_or_else(|| {
            FhirError::Translation(format!(
                "Author reference '{reference}' has no contained practitioner"
            ))
        })?
        .into_domain()?;

    let attachments = wire
        .content
        .into_iter()
        .map(|c| Attachment::try_from(c.attachment))
        .collect::<FhirResult<Vec<_>>>()?;

    let practice_speciality = wire
        .context
        .and_then(|c| c.practice_setting)
        .ok_or_else(|| {
            FhirError::Translation("DocumentReference is missing context.practiceSetting".into())
        })?;

    Ok(DocumentReference {
        title: wire.description.unwrap_or_default(),
        indexed: wire.indexed,
        status: wire.status,
        attachments,
        doc_type: wire.doc_type,
        author,
        practice_speciality,
    })
}
