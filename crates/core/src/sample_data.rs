//! Sample data builder.
//!
//! Fabricates the fixed FHIR resources shown by the sample application: a demonstration
//! practitioner, two coded concepts, attachments made from user-picked files, and a
//! document reference tying them together.
//!
//! Every call builds fresh values; nothing is cached or shared between calls.

use crate::constants::{
    GENERAL_MEDICINE, IHE_PRACTICE_SETTING_SYSTEM, LOINC_SYSTEM, OUTPATIENT_NOTE_CODE,
    OUTPATIENT_NOTE_DISPLAY,
};
use crate::datetime;
use chrono::{DateTime, FixedOffset};
use docref_files::{
    ContentResolver, DataRestrictionError, FileUtils, SourceLocator, OCTET_STREAM_MEDIA_TYPE,
};
use fhir::{
    Attachment, CodeableConcept, DocumentReference, DocumentReferenceStatus, FhirDateTime,
    FhirInstant, Practitioner,
};

/// Builds demonstration FHIR resources.
///
/// The fixed resources are associated functions; only attachment building needs the
/// [`FileUtils`] collaborator held by an instance.
#[derive(Debug, Clone, Default)]
pub struct SampleDataBuilder {
    file_utils: FileUtils,
}

impl SampleDataBuilder {
    pub fn new(file_utils: FileUtils) -> Self {
        Self { file_utils }
    }

    pub fn file_utils(&self) -> &FileUtils {
        &self.file_utils
    }

    /// The demonstration practitioner. Always identical.
    pub fn practitioner() -> Practitioner {
        Practitioner::build_with(
            "Bruce",
            "Banner",
            "Dr.",
            "MD",
            "Walvisbaai 3",
            "2333ZA",
            "Den helder",
            "+31715269111",
            "www.webpage.com",
        )
    }

    /// Practice specialty concept: "General Medicine" in the IHE practice setting codes.
    pub fn practice_speciality() -> CodeableConcept {
        CodeableConcept::single(IHE_PRACTICE_SETTING_SYSTEM, GENERAL_MEDICINE, GENERAL_MEDICINE)
    }

    /// Document type concept: LOINC 34108-1 "Outpatient Note".
    pub fn document_reference_type() -> CodeableConcept {
        CodeableConcept::single(LOINC_SYSTEM, OUTPATIENT_NOTE_CODE, OUTPATIENT_NOTE_DISPLAY)
    }

    /// Build an attachment from a user-picked file, stamped with the current time.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the file-access collaborator has no data for `locator`.
    ///
    /// # Errors
    ///
    /// Propagates [`DataRestrictionError`] from the file-access collaborator unchanged.
    pub fn build_attachment(
        &self,
        locator: &SourceLocator,
        resolver: &dyn ContentResolver,
    ) -> Result<Option<Attachment>, DataRestrictionError> {
        self.build_attachment_at(locator, resolver, &datetime::now())
    }

    /// [`Self::build_attachment`] with an explicit creation moment.
    pub fn build_attachment_at(
        &self,
        locator: &SourceLocator,
        resolver: &dyn ContentResolver,
        now: &DateTime<FixedOffset>,
    ) -> Result<Option<Attachment>, DataRestrictionError> {
        let Some(data) = self.file_utils.get_asset(locator, resolver)? else {
            tracing::warn!(%locator, "no data for source, skipping attachment");
            return Ok(None);
        };

        let creation = FhirDateTime::from(datetime::to_pattern_precision(now));
        let content_type = resolver
            .media_type(locator)
            .unwrap_or_else(|| OCTET_STREAM_MEDIA_TYPE.to_string());
        let title = self.file_utils.file_name(resolver, locator);

        tracing::debug!(%locator, %title, %content_type, size = data.len(), "built attachment");
        Ok(Some(Attachment::build_with(
            title,
            creation,
            content_type,
            data,
        )))
    }

    /// Build a document reference around `attachments`, indexed now.
    pub fn build_document(title: &str, attachments: Vec<Attachment>) -> DocumentReference {
        Self::build_document_at(title, attachments, &datetime::now())
    }

    /// [`Self::build_document`] with an explicit indexing moment.
    pub fn build_document_at(
        title: &str,
        attachments: Vec<Attachment>,
        now: &DateTime<FixedOffset>,
    ) -> DocumentReference {
        let indexed = FhirInstant::from(datetime::to_pattern_precision(now));

        tracing::debug!(title, attachments = attachments.len(), %indexed, "built document");
        DocumentReference::build_with(
            title,
            indexed,
            DocumentReferenceStatus::Current,
            attachments,
            Self::document_reference_type(),
            Self::practitioner(),
            Self::practice_speciality(),
        )
    }
}
