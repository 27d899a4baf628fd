//! FHIR `Attachment` model and builder.
//!
//! The domain type keeps the raw payload bytes; the wire type carries them base64-encoded
//! as FHIR requires. `size` and `hash` are always derived from the payload.

use crate::{FhirDateTime, FhirError, FhirResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// A binary payload with its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// Label to display in place of the data (the source file name).
    pub title: String,

    /// When the attachment was first created.
    pub creation: FhirDateTime,

    /// Media type of the payload.
    pub content_type: String,

    /// Raw payload bytes.
    pub data: Vec<u8>,

    /// Number of bytes in `data`.
    pub size: u64,

    /// Base64-encoded SHA-1 digest of `data`.
    pub hash: String,
}

impl Attachment {
    /// Build an attachment from its parts, deriving `size` and `hash` from the payload.
    pub fn build_with(
        title: impl Into<String>,
        creation: FhirDateTime,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        let size = data.len() as u64;
        let hash = STANDARD.encode(Sha1::digest(&data));
        Self {
            title: title.into(),
            creation,
            content_type: content_type.into(),
            data,
            size,
            hash,
        }
    }

    /// Render the attachment as FHIR JSON.
    pub fn render_json(&self) -> FhirResult<String> {
        crate::render_json(&AttachmentWire::from(self))
    }

    /// Render the attachment as YAML.
    pub fn render_yaml(&self) -> FhirResult<String> {
        crate::render_yaml(&AttachmentWire::from(self))
    }

    /// Parse an attachment from FHIR JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if the JSON does not match the attachment shape, if `data` is not
    /// valid base64, or if `size` or `hash` disagrees with the decoded payload.
    pub fn parse_json(json_text: &str) -> FhirResult<Self> {
        let wire: AttachmentWire = crate::parse_json(json_text, "Attachment")?;
        Attachment::try_from(wire)
    }
}

// ============================================================================
// Wire types (crate-internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct AttachmentWire {
    #[serde(rename = "contentType")]
    pub content_type: String,

    pub data: String,

    pub size: u64,

    pub hash: String,

    pub title: String,

    pub creation: FhirDateTime,
}

impl From<&Attachment> for AttachmentWire {
    fn from(attachment: &Attachment) -> Self {
        Self {
            content_type: attachment.content_type.clone(),
            data: STANDARD.encode(&attachment.data),
            size: attachment.size,
            hash: attachment.hash.clone(),
            title: attachment.title.clone(),
            creation: attachment.creation,
        }
    }
}

impl TryFrom<AttachmentWire> for Attachment {
    type Error = FhirError;

    fn try_from(wire: AttachmentWire) -> Result<Self, Self::Error> {
        let data = STANDARD
            .decode(wire.data.as_bytes())
            .map_err(|e| FhirError::Translation(format!("Attachment data is not base64: {e}")))?;

        if data.len() as u64 != wire.size {
            return Err(FhirError::InvalidInput(format!(
                "Attachment size {} does not match {} decoded bytes",
                wire.size,
                data.len()
            )));
        }

        let attachment =
            Attachment::build_with(wire.title, wire.creation, wire.content_type, data);
        if attachment.hash != wire.hash {
            return Err(FhirError::InvalidInput(format!(
                "Attachment hash {} does not match payload hash {}",
                wire.hash, attachment.hash
            )));
        }

        Ok(attachment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creation() -> FhirDateTime {
        FhirDateTime::parse("2021-05-04T10:15:30+02:00").unwrap()
    }

    #[test]
    fn build_with_derives_size() {
        let attachment =
            Attachment::build_with("scan.png", creation(), "image/png", vec![1, 2, 3, 4, 5]);
        assert_eq!(attachment.size, 5);
        assert_eq!(attachment.title, "scan.png");
        assert_eq!(attachment.content_type, "image/png");
    }

    #[test]
    fn build_with_derives_sha1_hash() {
        let attachment = Attachment::build_with(
            "scan.jpg",
            creation(),
            "image/jpeg",
            vec![0xFF, 0xD8, 0xFF, 0xDB],
        );
        assert_eq!(attachment.hash, "obkanHeotP32HiKllYhs/aRLUAc=");
    }

    #[test]
    fn renders_base64_payload() {
        let attachment =
            Attachment::build_with("note.pdf", creation(), "application/pdf", b"%PDF".to_vec());
        let json: serde_json::Value =
            serde_json::from_str(&attachment.render_json().unwrap()).unwrap();

        assert_eq!(json["contentType"], "application/pdf");
        assert_eq!(json["data"], "JVBERg==");
        assert_eq!(json["size"], 4);
        assert_eq!(json["hash"], "ObbXPv82STugZ05IJVqdgXJLRSE=");
        assert_eq!(json["title"], "note.pdf");
        assert_eq!(json["creation"], "2021-05-04T10:15:30+02:00");
    }

    #[test]
    fn parse_json_restores_payload() {
        let original =
            Attachment::build_with("scan.png", creation(), "image/png", vec![0x89, 0x50, 0x4E]);
        let parsed = Attachment::parse_json(&original.render_json().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn parse_json_rejects_size_mismatch() {
        let input = r#"{
            "contentType": "image/png",
            "data": "AQID",
            "size": 10,
            "hash": "cDeAcZjCKn0rCAc3HXY3eahP388=",
            "title": "scan.png",
            "creation": "2021-05-04"
        }"#;

        let err = Attachment::parse_json(input).expect_err("should reject size mismatch");
        match err {
            FhirError::InvalidInput(msg) => assert!(msg.contains("size 10")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn parse_json_rejects_hash_mismatch() {
        let input = r#"{
            "contentType": "image/png",
            "data": "AQID",
            "size": 3,
            "hash": "obkanHeotP32HiKllYhs/aRLUAc=",
            "title": "scan.png",
            "creation": "2021-05-04"
        }"#;

        let err = Attachment::parse_json(input).expect_err("should reject hash mismatch");
        match err {
            FhirError::InvalidInput(msg) => assert!(msg.contains("hash")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn parse_json_reports_failing_field() {
        let input = r#"{
            "contentType": "image/png",
            "data": "AQID",
            "size": "three",
            "hash": "cDeAcZjCKn0rCAc3HXY3eahP388=",
            "title": "scan.png",
            "creation": "2021-05-04"
        }"#;

        let err = Attachment::parse_json(input).expect_err("should reject wrong type");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("size")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
