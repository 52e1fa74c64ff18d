//! Field validator contract and the built-in validators.
//!
//! Each validator converts raw operator text into a typed value for exactly
//! one field. Malformed input is always `Retry` with a printable diagnostic,
//! never an error; the universal `exit`/`quit` token is recognized before any
//! field-specific rule and yields `CancelRequested`.
use crate::fields::{FieldValue, ValidationOutcome};
use crate::states::state_codes;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Converts raw text into a typed, constrained value for one field.
pub trait FieldValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome;
}

/// True when the trimmed input is the universal cancellation token.
pub fn exit_requested(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "exit" | "quit"
    )
}

/// Case-insensitive yes/no parse shared with the pipeline's continuation
/// prompt. Returns `None` for anything that is neither.
pub fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Integer age in [0, 120].
pub struct AgeValidator;

impl FieldValidator for AgeValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome {
        if exit_requested(raw) {
            return ValidationOutcome::CancelRequested;
        }
        match raw.trim().parse::<i64>() {
            Ok(age) if (0..=120).contains(&age) => {
                ValidationOutcome::Accepted(FieldValue::Age(age as u8))
            }
            _ => ValidationOutcome::Retry(
                "Invalid age. Please enter a number between 0 and 120 (or 'exit').".to_string(),
            ),
        }
    }
}

/// Personal name: first character a letter, then letters, spaces, hyphens,
/// or apostrophes. Input is trimmed before matching.
pub struct NameValidator {
    pattern: Regex,
    retry_text: String,
}

impl NameValidator {
    pub fn new(label: &str) -> Result<Self> {
        let pattern = Regex::new(r"^[A-Za-z][A-Za-z '\-]*$")
            .with_context(|| format!("compile {label} name pattern"))?;
        Ok(Self {
            pattern,
            retry_text: format!(
                "Invalid {label} name. Use letters, spaces, hyphens, or apostrophes (or 'exit')."
            ),
        })
    }
}

impl FieldValidator for NameValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome {
        if exit_requested(raw) {
            return ValidationOutcome::CancelRequested;
        }
        let trimmed = raw.trim();
        if self.pattern.is_match(trimmed) {
            ValidationOutcome::Accepted(FieldValue::Text(trimmed.to_string()))
        } else {
            ValidationOutcome::Retry(self.retry_text.clone())
        }
    }
}

/// Yes/no answer, accepting the common y/n abbreviations.
pub struct YesNoValidator;

impl FieldValidator for YesNoValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome {
        if exit_requested(raw) {
            return ValidationOutcome::CancelRequested;
        }
        match parse_yes_no(raw) {
            Some(flag) => ValidationOutcome::Accepted(FieldValue::Flag(flag)),
            None => ValidationOutcome::Retry(
                "Please answer Yes or No (or type 'exit' to cancel).".to_string(),
            ),
        }
    }
}

/// Two-letter state or territory code, uppercased before lookup.
pub struct StateValidator {
    codes: &'static BTreeSet<&'static str>,
}

impl StateValidator {
    pub fn new() -> Self {
        Self {
            codes: state_codes(),
        }
    }
}

impl Default for StateValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator for StateValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome {
        if exit_requested(raw) {
            return ValidationOutcome::CancelRequested;
        }
        let code = raw.trim().to_ascii_uppercase();
        if code.len() == 2 && self.codes.contains(code.as_str()) {
            ValidationOutcome::Accepted(FieldValue::Text(code))
        } else {
            ValidationOutcome::Retry(
                "Invalid state code. Please enter a valid two-letter code (or 'exit').".to_string(),
            )
        }
    }
}

/// ZIP code: exactly 5 digits, or 5 digits, hyphen, 4 digits.
pub struct ZipValidator {
    pattern: Regex,
}

impl ZipValidator {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"^\d{5}(-\d{4})?$").context("compile zip pattern")?;
        Ok(Self { pattern })
    }
}

impl FieldValidator for ZipValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome {
        if exit_requested(raw) {
            return ValidationOutcome::CancelRequested;
        }
        let trimmed = raw.trim();
        if self.pattern.is_match(trimmed) {
            ValidationOutcome::Accepted(FieldValue::Text(trimmed.to_string()))
        } else {
            ValidationOutcome::Retry(
                "Invalid ZIP. Please enter 5 digits or ZIP+4 (or 'exit').".to_string(),
            )
        }
    }
}
