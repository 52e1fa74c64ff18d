//! Shared test infrastructure for integration tests.
use voterflow::console::ScriptedConsole;
use voterflow::pipeline::Outcome;
use voterflow::registration::run_registration;

/// Script that answers every checkpoint and field prompt with valid input.
pub fn valid_script() -> Vec<&'static str> {
    vec![
        "yes", "Ann", // first name
        "yes", "Lee", // last name
        "yes", "25", // age
        "yes", "yes", // citizenship
        "yes", "MD", // state
        "yes", "21201", // zip
    ]
}

/// Drive the full flow against a scripted console and return both the
/// outcome and the console for transcript assertions.
pub fn run_scripted(script: Vec<&'static str>) -> (Outcome, ScriptedConsole) {
    let mut console = ScriptedConsole::new(script);
    let outcome = run_registration(&mut console, false).expect("registration run");
    (outcome, console)
}
