//! FHIR general-purpose data types.
//!
//! Responsibilities:
//! - `Coding` and `CodeableConcept`, which serialise in their FHIR shape directly
//! - The `dateTime` and `instant` primitives, with parsing and FHIR string rendering

use crate::FhirError;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Coded values
// ============================================================================

/// A code defined by a terminology system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    pub fn new(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            display: Some(display.into()),
        }
    }
}

/// A concept defined by one or more codings, plus optional free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Concept holding exactly one coding.
    pub fn single(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            coding: vec![Coding::new(system, code, display)],
            text: None,
        }
    }
}

// ============================================================================
// dateTime
// ============================================================================

/// FHIR `dateTime`: a year, year-month, date, or date-time with a time zone offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FhirDateTime {
    Year(i32),
    YearMonth(i32, u32),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl FhirDateTime {
    /// Parse a FHIR `dateTime` string.
    ///
    /// Accepted forms are `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and
    /// `YYYY-MM-DDThh:mm:ss[.fff](Z|+hh:mm|-hh:mm)`.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidDateTime`] for any other input, including a time without
    /// an offset.
    pub fn parse(input: &str) -> Result<Self, FhirError> {
        let invalid = || FhirError::InvalidDateTime(format!("not a FHIR dateTime: {input}"));

        if input.contains('T') {
            return DateTime::parse_from_rfc3339(input)
                .map(FhirDateTime::DateTime)
                .map_err(|_| invalid());
        }

        match input.len() {
            4 => {
                if !input.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                input.parse().map(FhirDateTime::Year).map_err(|_| invalid())
            }
            7 => NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d")
                .map(|d| FhirDateTime::YearMonth(d.year(), d.month()))
                .map_err(|_| invalid()),
            10 => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(FhirDateTime::Date)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl From<DateTime<FixedOffset>> for FhirDateTime {
    fn from(value: DateTime<FixedOffset>) -> Self {
        FhirDateTime::DateTime(value)
    }
}

impl fmt::Display for FhirDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FhirDateTime::Year(year) => write!(f, "{year:04}"),
            FhirDateTime::YearMonth(year, month) => write!(f, "{year:04}-{month:02}"),
            FhirDateTime::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            FhirDateTime::DateTime(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl FromStr for FhirDateTime {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FhirDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FhirDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FhirDateTime::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// instant
// ============================================================================

/// FHIR `instant`: a full date-time with seconds and a time zone offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FhirInstant(DateTime<FixedOffset>);

impl FhirInstant {
    /// Parse a FHIR `instant` string.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidDateTime`] unless the input is a complete RFC 3339
    /// date-time with an offset.
    pub fn parse(input: &str) -> Result<Self, FhirError> {
        DateTime::parse_from_rfc3339(input)
            .map(FhirInstant)
            .map_err(|_| FhirError::InvalidDateTime(format!("not a FHIR instant: {input}")))
    }

    pub fn as_date_time(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl From<DateTime<FixedOffset>> for FhirInstant {
    fn from(value: DateTime<FixedOffset>) -> Self {
        FhirInstant(value)
    }
}

impl fmt::Display for FhirInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for FhirInstant {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FhirInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FhirInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FhirInstant::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_concept_has_one_coding() {
        let concept = CodeableConcept::single("http://loinc.org", "34108-1", "Outpatient Note");
        assert_eq!(concept.coding.len(), 1);
        assert_eq!(concept.coding[0].code.as_deref(), Some("34108-1"));
        assert!(concept.text.is_none());
    }

    #[test]
    fn concept_serialises_in_fhir_shape() {
        let concept = CodeableConcept::single("http://loinc.org", "34108-1", "Outpatient Note");
        let json = serde_json::to_value(&concept).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "coding": [{
                    "system": "http://loinc.org",
                    "code": "34108-1",
                    "display": "Outpatient Note"
                }]
            })
        );
    }

    #[test]
    fn parses_partial_date_times() {
        assert_eq!(FhirDateTime::parse("2021").unwrap(), FhirDateTime::Year(2021));
        assert_eq!(
            FhirDateTime::parse("2021-05").unwrap(),
            FhirDateTime::YearMonth(2021, 5)
        );
        assert_eq!(
            FhirDateTime::parse("2021-05-04").unwrap(),
            FhirDateTime::Date(NaiveDate::from_ymd_opt(2021, 5, 4).unwrap())
        );
    }

    #[test]
    fn parses_and_renders_full_date_time() {
        let parsed = FhirDateTime::parse("2021-05-04T10:15:30+02:00").unwrap();
        assert!(matches!(parsed, FhirDateTime::DateTime(_)));
        assert_eq!(parsed.to_string(), "2021-05-04T10:15:30+02:00");

        let utc = FhirDateTime::parse("2021-05-04T10:15:30Z").unwrap();
        assert_eq!(utc.to_string(), "2021-05-04T10:15:30Z");
    }

    #[test]
    fn rejects_time_without_offset() {
        assert!(matches!(
            FhirDateTime::parse("2021-05-04T10:15:30"),
            Err(FhirError::InvalidDateTime(_))
        ));
    }

    #[test]
    fn rejects_malformed_date_times() {
        for input in ["21", "2021-13", "2021-02-30", "20x1", "yesterday"] {
            assert!(FhirDateTime::parse(input).is_err(), "accepted {input}");
        }
    }

    #[test]
    fn instant_requires_offset_and_time() {
        assert!(FhirInstant::parse("2021-05-04").is_err());
        assert!(FhirInstant::parse("2021-05-04T10:15:30").is_err());

        let instant = FhirInstant::parse("2021-05-04T10:15:30-05:00").unwrap();
        assert_eq!(instant.to_string(), "2021-05-04T10:15:30-05:00");
    }

    #[test]
    fn primitives_serialise_as_strings() {
        let instant = FhirInstant::parse("2021-05-04T10:15:30+02:00").unwrap();
        assert_eq!(
            serde_json::to_string(&instant).unwrap(),
            "\"2021-05-04T10:15:30+02:00\""
        );

        let date: FhirDateTime = serde_json::from_str("\"2021-05\"").unwrap();
        assert_eq!(date, FhirDateTime::YearMonth(2021, 5));
    }
}
