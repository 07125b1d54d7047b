//! Customer payload validation
//!
//! Field constraints live here instead of on the entity, and are checked
//! before any create or update reaches the service.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CustomerInput;

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 250;

static LETTERS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("letters-only pattern is valid"));

/// Customer payload as sent by clients on create and update.
///
/// Every field is optional on the wire so a missing value surfaces as a
/// violation rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[schema(example = "Mathew")]
    pub first_name: Option<String>,
    #[schema(example = "Martin")]
    pub last_name: Option<String>,
    /// `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339
    #[schema(example = "1984-12-20")]
    pub date_of_birth: Option<String>,
}

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint a payload failed, in field order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl CustomerDto {
    pub fn new(first_name: &str, last_name: &str, date_of_birth: &str) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            date_of_birth: Some(date_of_birth.to_string()),
        }
    }

    /// Check every field constraint and produce a [`CustomerInput`] when all pass.
    pub fn validate(self) -> Result<CustomerInput, ValidationErrors> {
        let mut violations = Vec::new();

        let first_name = check_name("firstName", "First Name", self.first_name, &mut violations);
        let last_name = check_name("lastName", "Last Name", self.last_name, &mut violations);

        let date_of_birth = match self.date_of_birth.as_deref().map(str::trim) {
            None | Some("") => {
                violations.push(FieldViolation {
                    field: "dateOfBirth",
                    message: "Date of Birth is required".to_string(),
                });
                None
            }
            Some(raw) => {
                let parsed = parse_date_of_birth(raw);
                if parsed.is_none() {
                    violations.push(FieldViolation {
                        field: "dateOfBirth",
                        message: format!("Date of Birth '{}' is not a valid date", raw),
                    });
                }
                parsed
            }
        };

        match (first_name, last_name, date_of_birth) {
            (Some(first_name), Some(last_name), Some(date_of_birth)) if violations.is_empty() => {
                Ok(CustomerInput {
                    first_name,
                    last_name,
                    date_of_birth,
                })
            }
            _ => Err(ValidationErrors(violations)),
        }
    }
}

fn check_name(
    field: &'static str,
    label: &str,
    value: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        violations.push(FieldViolation {
            field,
            message: format!("{} is required", label),
        });
        return None;
    };

    let before = violations.len();
    if !LETTERS_ONLY.is_match(&value) {
        violations.push(FieldViolation {
            field,
            message: "Please use only Letters".to_string(),
        });
    }
    let len = value.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        violations.push(FieldViolation {
            field,
            message: format!(
                "{} has to be between {} and {} Characters only",
                label, NAME_MIN_LEN, NAME_MAX_LEN
            ),
        });
    }

    (violations.len() == before).then_some(value)
}

/// Accepts a bare date (midnight is assumed), a naive timestamp, or RFC 3339.
/// Offsets are normalised to UTC.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
