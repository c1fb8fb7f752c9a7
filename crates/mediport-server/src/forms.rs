//! Typed form decoding and validation.
//!
//! Every form field is an `Option<String>` at the wire, so a missing field
//! decodes as `None` instead of failing the request. Validation helpers push
//! a message into [`Violations`] for every failed check and the handler
//! renders the accumulated message in one pass, rather than stopping at the
//! first problem. Numeric fields are parsed only after the presence check;
//! non-numeric input is a validation failure, never a panic.

use serde::Deserialize;

/// Accumulated validation messages for one request.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins every message into the single line shown on the form.
    pub fn into_message(self) -> String {
        self.0.join(" ")
    }
}

/// Requires a non-empty text field. Returns the trimmed value, or pushes
/// `missing` and returns `None`.
pub fn require_text(
    value: Option<&str>,
    violations: &mut Violations,
    missing: &str,
) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            violations.push(missing);
            None
        }
    }
}

/// Requires a non-empty numeric field. Pushes `missing` when the field is
/// absent or blank and `not_numeric` when it fails to parse as an integer.
pub fn require_i64(
    value: Option<&str>,
    violations: &mut Violations,
    missing: &str,
    not_numeric: &str,
) -> Option<i64> {
    let text = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => {
            violations.push(missing);
            return None;
        }
    };
    match text.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            violations.push(not_numeric);
            None
        }
    }
}

/// The closed set of accepted gender values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Requires a gender drawn from {male, female, other}.
pub fn require_gender(
    value: Option<&str>,
    violations: &mut Violations,
    missing: &str,
) -> Option<Gender> {
    match value.and_then(Gender::parse) {
        Some(g) => Some(g),
        None => {
            violations.push(missing);
            None
        }
    }
}

/// Fields of the `POST /add_patient` form.
#[derive(Debug, Deserialize)]
pub struct AddPatientForm {
    pub pid: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub zip: Option<String>,
}

/// Fields of the `POST /search_prescription` form.
#[derive(Debug, Deserialize)]
pub struct PrescriptionSearchForm {
    pub pid: Option<String>,
}

/// Fields of the `POST /search_doctor` form.
#[derive(Debug, Deserialize)]
pub struct DoctorSearchForm {
    pub pid: Option<String>,
    pub case_id: Option<String>,
}

/// Fields of the `POST /search_doctor_type` form.
#[derive(Debug, Deserialize)]
pub struct DoctorTypeSearchForm {
    #[serde(rename = "type")]
    pub specialty: Option<String>,
}

/// Fields of the `POST /search_near_med` form.
#[derive(Debug, Deserialize)]
pub struct NearMedSearchForm {
    pub drug_name: Option<String>,
    pub amount: Option<String>,
    pub zip: Option<String>,
}

/// Fields of the `POST /doctor_search_medicine` form.
#[derive(Debug, Deserialize)]
pub struct MedicineSearchForm {
    pub ndc: Option<String>,
    pub drug_name: Option<String>,
}

/// Fields of the `POST /doctor_search_patients` form.
#[derive(Debug, Deserialize)]
pub struct PatientSearchForm {
    pub pid: Option<String>,
}
