//! Stateless calculator utilities behind an interactive menu.
//!
//! These are simple request/response functions with no shared state; the
//! menu loop reuses the console seam and the retry-until-valid idiom from
//! the registration flow. Sub-prompts accept `q`/`quit`/`exit` to leave the
//! session.
use crate::console::Console;
use crate::validators::parse_yes_no;
use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

const MIN_PASSWORD_LEN: usize = 8;
const NUMERIC_RETRY_TEXT: &str = "Please enter a numeric value.";

/// Character classes selected for password generation.
#[derive(Debug, Clone, Copy)]
pub struct PasswordClasses {
    pub upper: bool,
    pub lower: bool,
    pub digits: bool,
    pub special: bool,
}

impl PasswordClasses {
    pub fn any(&self) -> bool {
        self.upper || self.lower || self.digits || self.special
    }
}

/// Generate a password of `length` characters drawn from the selected
/// classes, with at least one character from each selected class.
pub fn generate_password(length: usize, classes: PasswordClasses) -> Result<String> {
    if length < MIN_PASSWORD_LEN {
        bail!("password length must be at least {MIN_PASSWORD_LEN} characters");
    }
    let mut pools: Vec<&str> = Vec::new();
    if classes.lower {
        pools.push(LOWERCASE);
    }
    if classes.upper {
        pools.push(UPPERCASE);
    }
    if classes.digits {
        pools.push(DIGITS);
    }
    if classes.special {
        pools.push(SPECIAL);
    }
    if pools.is_empty() {
        bail!("at least one character class must be selected");
    }

    let combined: Vec<char> = pools.iter().flat_map(|pool| pool.chars()).collect();
    let mut rng = rand::thread_rng();
    let mut password: Vec<char> = Vec::with_capacity(length);
    for pool in &pools {
        let chars: Vec<char> = pool.chars().collect();
        let picked = chars
            .choose(&mut rng)
            .copied()
            .ok_or_else(|| anyhow!("empty character pool"))?;
        password.push(picked);
    }
    while password.len() < length {
        let picked = combined
            .choose(&mut rng)
            .copied()
            .ok_or_else(|| anyhow!("empty character pool"))?;
        password.push(picked);
    }
    password.shuffle(&mut rng);
    Ok(password.into_iter().collect())
}

/// `part/whole * 100`, rounded to `decimals` places; zero denominator is 0.
pub fn percentage(part: f64, whole: f64, decimals: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    ((part / whole) * 100.0 * factor).round() / factor
}

/// Non-negative days from `today` until July 4, 2025.
pub fn days_until_july_fourth(today: NaiveDate) -> Result<i64> {
    let target =
        NaiveDate::from_ymd_opt(2025, 7, 4).ok_or_else(|| anyhow!("invalid target date"))?;
    Ok((target - today).num_days().max(0))
}

/// Third side of a triangle given two sides and the included angle, by the
/// Law of Cosines.
pub fn triangle_leg(a: f64, b: f64, angle_degrees: f64) -> f64 {
    let angle = angle_degrees.to_radians();
    (a.powi(2) + b.powi(2) - 2.0 * a * b * angle.cos()).sqrt()
}

/// Volume of a right circular cylinder; radius and height must be
/// non-negative.
pub fn cylinder_volume(radius: f64, height: f64) -> Result<f64> {
    if radius < 0.0 || height < 0.0 {
        bail!("radius and height must be non-negative");
    }
    Ok(std::f64::consts::PI * radius.powi(2) * height)
}

/// Run the utilities menu until the operator picks exit or quits at a
/// sub-prompt.
pub fn run_menu(console: &mut dyn Console) -> Result<()> {
    loop {
        console.write_line("")?;
        console.write_line("(a) Password Generator")?;
        console.write_line("(b) Calculate and Format Percentage")?;
        console.write_line("(c) Days until July 4, 2025")?;
        console.write_line("(d) Calculate Leg of Triangle")?;
        console.write_line("(e) Right Cylinder Volume")?;
        console.write_line("(f) Exit")?;

        let choice = console.read_line("Choice: ")?;
        let handled = match choice.trim().to_ascii_lowercase().as_str() {
            "a" => handle_password(console)?,
            "b" => handle_percentage(console)?,
            "c" => handle_days(console)?,
            "d" => handle_triangle(console)?,
            "e" => handle_cylinder(console)?,
            "f" => return Ok(()),
            _ => {
                console.write_line("Invalid option.")?;
                Some(())
            }
        };
        // A sub-prompt quit ends the whole session.
        if handled.is_none() {
            return Ok(());
        }
    }
}

fn handle_password(console: &mut dyn Console) -> Result<Option<()>> {
    let Some(length) = read_number(console, "Length (>=8)", Some(8.0))? else {
        return Ok(None);
    };
    let classes = loop {
        let Some(upper) = read_yes_no(console, "Include uppercase?")? else {
            return Ok(None);
        };
        let Some(lower) = read_yes_no(console, "Include lowercase?")? else {
            return Ok(None);
        };
        let Some(digits) = read_yes_no(console, "Include digits?")? else {
            return Ok(None);
        };
        let Some(special) = read_yes_no(console, "Include special characters?")? else {
            return Ok(None);
        };
        let classes = PasswordClasses {
            upper,
            lower,
            digits,
            special,
        };
        if classes.any() {
            break classes;
        }
        console.write_line("Select at least one character set.")?;
    };
    let password = generate_password(length as usize, classes)?;
    console.write_line(&password)?;
    Ok(Some(()))
}

fn handle_percentage(console: &mut dyn Console) -> Result<Option<()>> {
    let Some(part) = read_number(console, "Numerator", None)? else {
        return Ok(None);
    };
    let Some(whole) = read_number(console, "Denominator", None)? else {
        return Ok(None);
    };
    let Some(decimals) = read_number(console, "Decimals", Some(0.0))? else {
        return Ok(None);
    };
    let value = percentage(part, whole, decimals as u32);
    console.write_line(&format!("{value} %"))?;
    Ok(Some(()))
}

fn handle_days(console: &mut dyn Console) -> Result<Option<()>> {
    let days = days_until_july_fourth(Local::now().date_naive())?;
    console.write_line(&format!("{days} days"))?;
    Ok(Some(()))
}

fn handle_triangle(console: &mut dyn Console) -> Result<Option<()>> {
    let Some(a) = read_number(console, "Side a", None)? else {
        return Ok(None);
    };
    let Some(b) = read_number(console, "Side b", None)? else {
        return Ok(None);
    };
    let Some(angle) = read_number(console, "Angle (degrees)", None)? else {
        return Ok(None);
    };
    console.write_line(&triangle_leg(a, b, angle).to_string())?;
    Ok(Some(()))
}

fn handle_cylinder(console: &mut dyn Console) -> Result<Option<()>> {
    let Some(radius) = read_number(console, "Radius", Some(0.0))? else {
        return Ok(None);
    };
    let Some(height) = read_number(console, "Height", Some(0.0))? else {
        return Ok(None);
    };
    console.write_line(&cylinder_volume(radius, height)?.to_string())?;
    Ok(Some(()))
}

fn quit_requested(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "q" | "quit" | "exit"
    )
}

/// Numeric sub-prompt with retry-until-valid; `None` means the operator quit.
fn read_number(console: &mut dyn Console, label: &str, min: Option<f64>) -> Result<Option<f64>> {
    let prompt = format!("{label} (q to quit): ");
    loop {
        let raw = console.read_line(&prompt)?;
        if quit_requested(&raw) {
            return Ok(None);
        }
        match raw.trim().parse::<f64>() {
            Ok(value) => {
                if let Some(min) = min {
                    if value < min {
                        console.write_line(&format!("Must be >= {min}."))?;
                        continue;
                    }
                }
                return Ok(Some(value));
            }
            Err(_) => console.write_line(NUMERIC_RETRY_TEXT)?,
        }
    }
}

/// Yes/no sub-prompt with retry-until-valid; `None` means the operator quit.
fn read_yes_no(console: &mut dyn Console, label: &str) -> Result<Option<bool>> {
    let prompt = format!("{label} (y/n, q to quit): ");
    loop {
        let raw = console.read_line(&prompt)?;
        if quit_requested(&raw) {
            return Ok(None);
        }
        match parse_yes_no(&raw) {
            Some(answer) => return Ok(Some(answer)),
            None => console.write_line("Please enter y or n.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    const ALL_CLASSES: PasswordClasses = PasswordClasses {
        upper: true,
        lower: true,
        digits: true,
        special: true,
    };

    #[test]
    fn password_has_requested_length_and_one_of_each_class() {
        let password = generate_password(16, ALL_CLASSES).expect("generate");
        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| SPECIAL.contains(c)));
    }

    #[test]
    fn password_respects_class_selection() {
        let classes = PasswordClasses {
            upper: false,
            lower: true,
            digits: true,
            special: false,
        };
        let password = generate_password(12, classes).expect("generate");
        assert!(password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn password_rejects_short_length_and_empty_selection() {
        assert!(generate_password(7, ALL_CLASSES).is_err());
        let none = PasswordClasses {
            upper: false,
            lower: false,
            digits: false,
            special: false,
        };
        assert!(generate_password(12, none).is_err());
    }

    #[test]
    fn percentage_rounds_and_handles_zero_denominator() {
        assert_eq!(percentage(1.0, 3.0, 2), 33.33);
        assert_eq!(percentage(1.0, 2.0, 0), 50.0);
        assert_eq!(percentage(5.0, 0.0, 2), 0.0);
    }

    #[test]
    fn days_until_counts_down_and_clamps_at_zero() {
        let before = NaiveDate::from_ymd_opt(2025, 7, 1).expect("date");
        assert_eq!(days_until_july_fourth(before).expect("days"), 3);
        let after = NaiveDate::from_ymd_opt(2026, 1, 1).expect("date");
        assert_eq!(days_until_july_fourth(after).expect("days"), 0);
    }

    #[test]
    fn right_angle_triangle_reduces_to_pythagoras() {
        let c = triangle_leg(3.0, 4.0, 90.0);
        assert!((c - 5.0).abs() < 1e-9, "got {c}");
    }

    #[test]
    fn cylinder_volume_formula_and_negative_rejection() {
        let volume = cylinder_volume(1.0, 1.0).expect("volume");
        assert!((volume - std::f64::consts::PI).abs() < 1e-12);
        assert!(cylinder_volume(-1.0, 1.0).is_err());
        assert!(cylinder_volume(1.0, -1.0).is_err());
    }

    #[test]
    fn menu_exits_on_f() {
        let mut console = ScriptedConsole::new(["f"]);
        run_menu(&mut console).expect("menu");
    }

    #[test]
    fn menu_quit_token_at_sub_prompt_ends_session() {
        let mut console = ScriptedConsole::new(["b", "q"]);
        run_menu(&mut console).expect("menu");
        assert_eq!(console.remaining_inputs(), 0);
    }

    #[test]
    fn menu_percentage_round_trip() {
        let mut console = ScriptedConsole::new(["b", "1", "2", "0", "f"]);
        run_menu(&mut console).expect("menu");
        assert!(console
            .transcript()
            .contains(&"out: 50 %".to_string()));
    }

    #[test]
    fn menu_invalid_option_reprompts() {
        let mut console = ScriptedConsole::new(["z", "f"]);
        run_menu(&mut console).expect("menu");
        assert!(console
            .transcript()
            .contains(&"out: Invalid option.".to_string()));
    }

    #[test]
    fn numeric_prompt_retries_on_garbage() {
        let mut console = ScriptedConsole::new(["abc", "3"]);
        let value = read_number(&mut console, "Side a", None).expect("read");
        assert_eq!(value, Some(3.0));
        assert!(console
            .transcript()
            .contains(&format!("out: {NUMERIC_RETRY_TEXT}")));
    }
}
