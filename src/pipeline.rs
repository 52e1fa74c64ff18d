//! Guarded step pipeline.
//!
//! Drives an ordered list of validated prompts to exactly one terminal
//! `Outcome`. Cancellation is an ordinary return value propagated upward,
//! never an error or a panic: every step-running path returns the `Outcome`
//! type, which preserves short-circuit-from-any-depth without control flow
//! by exception.
use crate::console::Console;
use crate::fields::{Field, FieldValue, ValidationOutcome};
use crate::validators::{parse_yes_no, FieldValidator};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Cancellation text for declining the first continuation checkpoint.
pub const INITIAL_DECLINE_TEXT: &str =
    "Thanks for trying the Voter Registration Application. Goodbye!";
/// Cancellation text for any mid-flow decline or explicit exit token.
pub const CANCELED_TEXT: &str = "Registration canceled. Goodbye!";

const YES_NO_RETRY_TEXT: &str = "Please answer Yes or No.";

/// Post-acceptance eligibility decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Pass,
    Abort(String),
}

/// Predicate over an accepted value that can veto continuation.
pub type Guard = Box<dyn Fn(&FieldValue) -> GuardOutcome>;

/// One prompt in the pipeline: a field, its validator, and an optional
/// eligibility guard. Ordering is fixed once the run starts.
pub struct Step {
    pub field: Field,
    pub prompt: String,
    pub validator: Box<dyn FieldValidator>,
    pub guard: Option<Guard>,
}

impl Step {
    pub fn new(field: Field, prompt: impl Into<String>, validator: Box<dyn FieldValidator>) -> Self {
        Self {
            field,
            prompt: prompt.into(),
            validator,
            guard: None,
        }
    }

    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }
}

/// Accepted values keyed by field; grows monotonically as steps complete and
/// is discarded whole on any abort.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationResult(BTreeMap<Field, FieldValue>);

impl RegistrationResult {
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: Field, value: FieldValue) {
        self.0.insert(field, value);
    }
}

/// Terminal result of a pipeline run; exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(RegistrationResult),
    Cancelled(String),
}

/// Ordered steps plus the continuation question asked before each one.
///
/// Holds no mutable state between runs; the result map and step cursor are
/// created per invocation, so repeated or concurrent runs are independent.
pub struct Pipeline {
    steps: Vec<Step>,
    continue_prompt: String,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>, continue_prompt: impl Into<String>) -> Self {
        Self {
            steps,
            continue_prompt: continue_prompt.into(),
        }
    }

    /// Run every step in order against the console.
    ///
    /// Returns `Err` only for environment failures (a closed input stream);
    /// all domain terminations, including cancellation, are `Ok(Outcome)`.
    pub fn run(&self, console: &mut dyn Console) -> Result<Outcome> {
        let mut record = RegistrationResult::default();

        for (index, step) in self.steps.iter().enumerate() {
            if !self.ask_continue(console)? {
                let text = if index == 0 {
                    INITIAL_DECLINE_TEXT
                } else {
                    CANCELED_TEXT
                };
                tracing::debug!(step = %step.field, "operator declined continuation");
                return Ok(Outcome::Cancelled(text.to_string()));
            }

            let value = match self.collect_value(step, console)? {
                Some(value) => value,
                None => {
                    tracing::debug!(step = %step.field, "operator requested exit");
                    return Ok(Outcome::Cancelled(CANCELED_TEXT.to_string()));
                }
            };

            if let Some(guard) = &step.guard {
                if let GuardOutcome::Abort(reason) = guard(&value) {
                    tracing::info!(step = %step.field, "eligibility guard veto");
                    return Ok(Outcome::Cancelled(reason));
                }
            }

            record.insert(step.field, value);
        }

        tracing::info!(fields = record.len(), "registration completed");
        Ok(Outcome::Completed(record))
    }

    /// Prompt-and-validate loop for one step. `None` means the operator
    /// asked to cancel; `Retry` prints its reason and re-prompts with no
    /// attempt limit.
    fn collect_value(&self, step: &Step, console: &mut dyn Console) -> Result<Option<FieldValue>> {
        loop {
            let raw = console.read_line(&step.prompt)?;
            match step.validator.validate(&raw) {
                ValidationOutcome::Accepted(value) => return Ok(Some(value)),
                ValidationOutcome::CancelRequested => return Ok(None),
                ValidationOutcome::Retry(reason) => console.write_line(&reason)?,
            }
        }
    }

    /// Continuation checkpoint; re-asks until the answer parses as yes/no.
    fn ask_continue(&self, console: &mut dyn Console) -> Result<bool> {
        loop {
            let raw = console.read_line(&self.continue_prompt)?;
            match parse_yes_no(&raw) {
                Some(answer) => return Ok(answer),
                None => console.write_line(YES_NO_RETRY_TEXT)?,
            }
        }
    }
}
