//! Voter registration flow: step table, eligibility guards, and the
//! banner/summary presentation around a pipeline run.
use crate::console::Console;
use crate::fields::{Field, FieldValue};
use crate::pipeline::{GuardOutcome, Outcome, Pipeline, RegistrationResult, Step};
use crate::states::name_for_code;
use crate::validators::{AgeValidator, NameValidator, StateValidator, YesNoValidator, ZipValidator};
use anyhow::{anyhow, Context, Result};

const BANNER_WIDTH: usize = 64;
const WELCOME_TEXT: &str = "Welcome to the Voter Registration Application.";
const CONTINUE_PROMPT: &str = "Do you want to continue with Voter Registration? (Yes/No): ";
const MIN_VOTING_AGE: u8 = 18;

const UNDERAGE_TEXT: &str = "You must be at least 18 years old to register to vote.\nThanks for trying the Voter Registration Application.";
const NON_CITIZEN_TEXT: &str = "Only U.S. citizens are eligible to register to vote.\nThanks for trying the Voter Registration Application.";

/// Build the six registration steps in their fixed order.
pub fn build_pipeline() -> Result<Pipeline> {
    let steps = vec![
        Step::new(
            Field::FirstName,
            "Enter your first name: ",
            Box::new(NameValidator::new("first")?),
        ),
        Step::new(
            Field::LastName,
            "Enter your last name: ",
            Box::new(NameValidator::new("last")?),
        ),
        Step::new(Field::Age, "Enter your age: ", Box::new(AgeValidator)).with_guard(Box::new(
            |value| match value.as_age() {
                Some(age) if age < MIN_VOTING_AGE => GuardOutcome::Abort(UNDERAGE_TEXT.to_string()),
                _ => GuardOutcome::Pass,
            },
        )),
        Step::new(
            Field::Citizenship,
            "Are you a U.S. Citizen? (Yes/No): ",
            Box::new(YesNoValidator),
        )
        .with_guard(Box::new(|value| match value.as_flag() {
            Some(false) => GuardOutcome::Abort(NON_CITIZEN_TEXT.to_string()),
            _ => GuardOutcome::Pass,
        })),
        Step::new(
            Field::StateOfResidence,
            "What state do you live in? (Two-letter code, e.g., MD): ",
            Box::new(StateValidator::new()),
        ),
        Step::new(
            Field::ZipCode,
            "Enter your zip code (##### or #####-####): ",
            Box::new(ZipValidator::new()?),
        ),
    ];
    Ok(Pipeline::new(steps, CONTINUE_PROMPT))
}

/// Run the full interactive flow and render its terminal message.
///
/// Returns the pipeline `Outcome` so callers (and tests) can inspect it;
/// with `json` set, a completed record is emitted as a JSON object instead
/// of the prose summary.
pub fn run_registration(console: &mut dyn Console, json: bool) -> Result<Outcome> {
    let banner = "*".repeat(BANNER_WIDTH);
    console.write_line(&banner)?;
    console.write_line(WELCOME_TEXT)?;
    console.write_line("")?;

    let pipeline = build_pipeline()?;
    let outcome = pipeline.run(console)?;

    match &outcome {
        Outcome::Completed(record) => {
            if json {
                let rendered =
                    serde_json::to_string_pretty(record).context("serialize registration record")?;
                console.write_line(&rendered)?;
            } else {
                write_summary(console, record)?;
            }
        }
        Outcome::Cancelled(reason) => console.write_line(reason)?,
    }
    console.write_line(&banner)?;
    Ok(outcome)
}

fn write_summary(console: &mut dyn Console, record: &RegistrationResult) -> Result<()> {
    let first = require_text(record, Field::FirstName)?;
    let last = require_text(record, Field::LastName)?;
    let age = record
        .get(Field::Age)
        .and_then(FieldValue::as_age)
        .ok_or_else(|| anyhow!("completed record missing age"))?;
    let citizen = record
        .get(Field::Citizenship)
        .and_then(FieldValue::as_flag)
        .ok_or_else(|| anyhow!("completed record missing citizenship"))?;
    let state = require_text(record, Field::StateOfResidence)?;
    let zip = require_text(record, Field::ZipCode)?;

    let state_line = match name_for_code(state) {
        Some(name) => format!("State: {name} ({state})"),
        None => format!("State: {state}"),
    };

    console.write_line("")?;
    console.write_line("Thanks for registering to vote. Here is the information we received:")?;
    console.write_line(&format!("Name (first last): {first} {last}"))?;
    console.write_line(&format!("Age: {age}"))?;
    console.write_line(&format!(
        "U.S. Citizen: {}",
        if citizen { "Yes" } else { "No" }
    ))?;
    console.write_line(&state_line)?;
    console.write_line(&format!("Zipcode: {zip}"))?;
    console.write_line("")?;
    console.write_line(
        "Thanks for trying the Voter Registration Application. Your voter registration card should be shipped within 3 weeks.",
    )?;
    Ok(())
}

fn require_text(record: &RegistrationResult, field: Field) -> Result<&str> {
    record
        .get(field)
        .and_then(FieldValue::as_text)
        .ok_or_else(|| anyhow!("completed record missing {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    #[test]
    fn pipeline_has_six_steps_in_registration_order() {
        // Smoke test through a full scripted run; ordering is asserted by
        // the prompts appearing in sequence.
        let mut console = ScriptedConsole::new([
            "yes", "Ann", "yes", "Lee", "yes", "25", "yes", "yes", "yes", "MD", "yes", "21201",
        ]);
        let outcome = run_registration(&mut console, false).expect("run");
        assert!(matches!(outcome, Outcome::Completed(_)));

        let prompts: Vec<&str> = console
            .transcript()
            .iter()
            .filter(|line| line.starts_with("prompt: Enter") || line.starts_with("prompt: Are") || line.starts_with("prompt: What"))
            .map(String::as_str)
            .collect();
        assert_eq!(
            prompts,
            [
                "prompt: Enter your first name: ",
                "prompt: Enter your last name: ",
                "prompt: Enter your age: ",
                "prompt: Are you a U.S. Citizen? (Yes/No): ",
                "prompt: What state do you live in? (Two-letter code, e.g., MD): ",
                "prompt: Enter your zip code (##### or #####-####): ",
            ]
        );
    }

    #[test]
    fn summary_lists_every_field() {
        let mut console = ScriptedConsole::new([
            "yes", "Ann", "yes", "Lee", "yes", "25", "yes", "yes", "yes", "MD", "yes", "21201",
        ]);
        run_registration(&mut console, false).expect("run");
        let transcript = console.transcript().join("\n");
        assert!(transcript.contains("Name (first last): Ann Lee"));
        assert!(transcript.contains("Age: 25"));
        assert!(transcript.contains("U.S. Citizen: Yes"));
        assert!(transcript.contains("State: Maryland (MD)"));
        assert!(transcript.contains("Zipcode: 21201"));
    }

    #[test]
    fn json_mode_emits_snake_case_record() {
        let mut console = ScriptedConsole::new([
            "yes", "Ann", "yes", "Lee", "yes", "25", "yes", "yes", "yes", "MD", "yes", "21201",
        ]);
        run_registration(&mut console, true).expect("run");
        let json_line = console
            .transcript()
            .iter()
            .find(|line| line.contains("first_name"))
            .expect("json output present");
        assert!(json_line.contains("\"first_name\": \"Ann\""));
        assert!(json_line.contains("\"age\": 25"));
        assert!(json_line.contains("\"citizenship\": true"));
    }

    #[test]
    fn underage_guard_cancels_with_eligibility_text() {
        let mut console = ScriptedConsole::new(["yes", "Ann", "yes", "Lee", "yes", "16"]);
        let outcome = run_registration(&mut console, false).expect("run");
        assert_eq!(outcome, Outcome::Cancelled(UNDERAGE_TEXT.to_string()));
    }

    #[test]
    fn non_citizen_guard_cancels_with_eligibility_text() {
        let mut console =
            ScriptedConsole::new(["yes", "Ann", "yes", "Lee", "yes", "30", "yes", "no"]);
        let outcome = run_registration(&mut console, false).expect("run");
        assert_eq!(outcome, Outcome::Cancelled(NON_CITIZEN_TEXT.to_string()));
    }
}
