//! Field identifiers and per-attempt validation outcomes.
//!
//! `Field` keys the result map and serializes as a snake_case string so a
//! completed record is directly usable as a JSON object.
use serde::Serialize;
use std::fmt;

/// One discrete piece of information collected by a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Age,
    Citizenship,
    StateOfResidence,
    ZipCode,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Age => "age",
            Field::Citizenship => "citizenship",
            Field::StateOfResidence => "state_of_residence",
            Field::ZipCode => "zip_code",
        };
        f.write_str(name)
    }
}

/// Typed value produced when a validator accepts raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Age(u8),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_age(&self) -> Option<u8> {
        match self {
            FieldValue::Age(age) => Some(*age),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

/// Result of applying a field validator to one raw input attempt.
///
/// `Retry` carries the diagnostic to print before re-prompting; it is never
/// an error. Only the universal cancellation token produces
/// `CancelRequested`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(FieldValue),
    Retry(String),
    CancelRequested,
}
