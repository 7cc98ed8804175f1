use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use std::fmt::Display;
use std::io::IsTerminal;
use std::str::FromStr;

/// Prompts need a terminal; piped stdin gets an error instead of a hang.
pub fn ensure_interactive(what: &str) -> Result<()> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!("{} is required when not running in a terminal", what))
    }
}

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map(|s| s.trim().to_string())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt until a non-blank value is entered
pub fn prompt_required_string(prompt: &str, default: Option<&str>, output: &Output) -> Result<String> {
    loop {
        let value = prompt_string(prompt, default)?;
        if !value.is_empty() {
            return Ok(value);
        }
        output.error("A value is required.");
    }
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt for a number within `min..=max`, re-asking on bad input
pub fn prompt_number<T>(prompt: &str, default: Option<T>, min: T, max: T, output: &Output) -> Result<T>
where
    T: FromStr + PartialOrd + Display + Copy,
{
    loop {
        let mut input_builder = Input::<String>::new().with_prompt(prompt);

        if let Some(default_value) = default {
            input_builder = input_builder.default(default_value.to_string());
        }

        let input_str = input_builder
            .interact_text()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match parse_in_range(&input_str, min, max) {
            Ok(num) => return Ok(num),
            Err(msg) => output.error(msg),
        }
    }
}

/// Pick one entry from a list, returning its index
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

fn parse_in_range<T>(input: &str, min: T, max: T) -> std::result::Result<T, String>
where
    T: FromStr + PartialOrd + Display + Copy,
{
    let trimmed = input.trim();
    let value = trimmed
        .parse::<T>()
        .map_err(|_| "Invalid input. Please enter a valid number.".to_string())?;
    if !(value >= min && value <= max) {
        return Err(format!("Value must be between {} and {}.", min, max));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_in_range() {
        assert_eq!(parse_in_range(" 7 ", 1u32, 10).unwrap(), 7);
        assert!(parse_in_range("0", 1u32, 10).is_err());
        assert!(parse_in_range("11", 1u32, 10).is_err());
        assert!(parse_in_range("seven", 1u32, 10).is_err());
        assert_eq!(parse_in_range("4.5", 0.0f64, 5.0).unwrap(), 4.5);
        assert!(parse_in_range("NaN", 0.0f64, 5.0).is_err());
    }
}
