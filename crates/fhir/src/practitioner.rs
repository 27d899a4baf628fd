//! FHIR-aligned practitioner model, builder and wire translation.
//!
//! Responsibilities:
//! - Define a flat domain-level practitioner carrying one name, one address, a phone
//!   number and a website
//! - Map it onto the nested FHIR wire shape (`name`, `address`, `telecom`)
//!
//! Notes:
//! - Wire parsing keeps only the first name and address entry

use crate::{FhirError, FhirResult};
use serde::{Deserialize, Serialize};

const RESOURCE_TYPE: &str = "Practitioner";
const TELECOM_PHONE: &str = "phone";
const TELECOM_URL: &str = "url";

// ============================================================================
// Public domain-level types
// ============================================================================

/// Domain-level carrier for a practitioner (flat structure).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Practitioner {
    pub first_name: String,
    pub last_name: String,
    /// Title shown before the name, e.g. `Dr.`.
    pub prefix: String,
    /// Qualification shown after the name, e.g. `MD`.
    pub suffix: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub telephone: String,
    pub website: String,
}

impl Practitioner {
    /// Build a practitioner from its display values.
    #[allow(clippy::too_many_arguments)]
    pub fn build_with(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            street: street.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            telephone: telephone.into(),
            website: website.into(),
        }
    }

    /// Render the practitioner as a standalone FHIR JSON resource.
    pub fn render_json(&self) -> FhirResult<String> {
        crate::render_json(&PractitionerWire::from_domain(self, None))
    }

    /// Render the practitioner as YAML.
    pub fn render_yaml(&self) -> FhirResult<String> {
        crate::render_yaml(&PractitionerWire::from_domain(self, None))
    }

    /// Parse a practitioner from FHIR JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the JSON does not match the practitioner wire schema,
    /// - any unknown keys are present,
    /// - resourceType is not "Practitioner",
    /// - a name, address, phone or url entry is missing.
    pub fn parse_json(json_text: &str) -> FhirResult<Self> {
        let wire: PractitionerWire = crate::parse_json(json_text, RESOURCE_TYPE)?;
        wire.into_domain()
    }
}

// ============================================================================
// Wire types (crate-internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct PractitionerWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanNameWire>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPointWire>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<AddressWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct HumanNameWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffix: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ContactPointWire {
    pub system: String,
    pub value: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct AddressWire {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "postalCode", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

// ============================================================================
// Helper functions (crate-internal)
// ============================================================================

fn required<T>(value: Option<T>, field: &str) -> FhirResult<T> {
    value.ok_or_else(|| FhirError::Translation(format!("Practitioner is missing {field}")))
}

impl PractitionerWire {
    pub(crate) fn from_domain(data: &Practitioner, id: Option<&str>) -> Self {
        Self {
            resource_type: RESOURCE_TYPE.to_string(),
            id: id.map(str::to_owned),
            name: vec![HumanNameWire {
                family: Some(data.last_name.clone()),
                given: vec![data.first_name.clone()],
                prefix: vec![data.prefix.clone()],
                suffix: vec![data.suffix.clone()],
            }],
            telecom: vec![
                ContactPointWire {
                    system: TELECOM_PHONE.to_string(),
                    value: data.telephone.clone(),
                },
                ContactPointWire {
                    system: TELECOM_URL.to_string(),
                    value: data.website.clone(),
                },
            ],
            address: vec![AddressWire {
                line: vec![data.street.clone()],
                city: Some(data.city.clone()),
                postal_code: Some(data.postal_code.clone()),
            }],
        }
    }

    pub(crate) fn into_domain(self) -> FhirResult<Practitioner> {
        if self.resource_type != RESOURCE_TYPE {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType '{RESOURCE_TYPE}', got '{}'",
                self.resource_type
            )));
        }

        let name = required(self.name.into_iter().next(), "name")?;
        let address = required(self.address.into_iter().next(), "address")?;
        let telecom_value = |system: &str| {
            self.telecom
                .iter()
                .find(|t| t.system == system)
                .map(|t| t.value.clone())
        };

        Ok(Practitioner {
            first_name: required(name.given.into_iter().next(), "name.given")?,
            last_name: required(name.family, "name.family")?,
            prefix: required(name.prefix.into_iter().next(), "name.prefix")?,
            suffix: required(name.suffix.into_iter().next(), "name.suffix")?,
            street: required(address.line.into_iter().next(), "address.line")?,
            postal_code: required(address.postal_code, "address.postalCode")?,
            city: required(address.city, "address.city")?,
            telephone: required(telecom_value(TELECOM_PHONE), "telecom phone")?,
            website: required(telecom_value(TELECOM_URL), "telecom url")?,
        })
    }
}
