//! This module checks a machine description for consistency before a [`TuringMachine`] is
//! created: the alphabets must agree on the blank symbol, and the state set must contain the
//! special states while the initial state avoids them.
//!
//! [`TuringMachine`]: crate::machine::TuringMachine

use crate::types::{ConfigurationError, BLANK, SPECIAL_STATES};

/// The static part of a machine, borrowed for validation.
#[derive(Debug, Clone, Copy)]
pub struct Description<'a> {
    pub states: &'a [String],
    pub input_alphabet: &'a [String],
    pub tape_alphabet: &'a [String],
    pub initial_state: &'a str,
}

/// Validates a machine description.
///
/// The checks run in a fixed order and the first failure is returned.
///
/// # Returns
///
/// * `Ok(())` if the description is consistent.
/// * `Err(ConfigurationError)` naming the first violated rule.
pub fn validate(description: &Description<'_>) -> Result<(), ConfigurationError> {
    [
        check_input_subset_of_tape,
        check_blank_in_tape,
        check_blank_not_in_input,
        check_special_states,
        check_initial_not_special,
        check_initial_known,
    ]
    .iter()
    .try_for_each(|check| check(description))
}

fn contains(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|item| item == needle)
}

fn check_input_subset_of_tape(description: &Description<'_>) -> Result<(), ConfigurationError> {
    match description
        .input_alphabet
        .iter()
        .find(|symbol| !contains(description.tape_alphabet, symbol))
    {
        Some(symbol) => Err(ConfigurationError::NotSubset(symbol.clone())),
        None => Ok(()),
    }
}

fn check_blank_in_tape(description: &Description<'_>) -> Result<(), ConfigurationError> {
    if contains(description.tape_alphabet, BLANK) {
        Ok(())
    } else {
        Err(ConfigurationError::MissingBlank)
    }
}

fn check_blank_not_in_input(description: &Description<'_>) -> Result<(), ConfigurationError> {
    if contains(description.input_alphabet, BLANK) {
        Err(ConfigurationError::BlankInInput)
    } else {
        Ok(())
    }
}

fn check_special_states(description: &Description<'_>) -> Result<(), ConfigurationError> {
    let missing: Vec<String> = SPECIAL_STATES
        .iter()
        .filter(|state| !contains(description.states, state))
        .map(|state| state.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::MissingSpecialStates(missing))
    }
}

fn check_initial_not_special(description: &Description<'_>) -> Result<(), ConfigurationError> {
    if SPECIAL_STATES.contains(&description.initial_state) {
        Err(ConfigurationError::SpecialInitialState(
            description.initial_state.to_string(),
        ))
    } else {
        Ok(())
    }
}

fn check_initial_known(description: &Description<'_>) -> Result<(), ConfigurationError> {
    if contains(description.states, description.initial_state) {
        Ok(())
    } else {
        Err(ConfigurationError::UnknownInitialState(
            description.initial_state.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct Fixture {
        states: Vec<String>,
        input: Vec<String>,
        tape: Vec<String>,
        initial: String,
    }

    impl Fixture {
        fn valid() -> Self {
            Self {
                states: strings(&["accept", "reject", "q0", "q1"]),
                input: strings(&["a", "b"]),
                tape: strings(&["a", "b", ""]),
                initial: "q0".to_string(),
            }
        }

        fn check(&self) -> Result<(), ConfigurationError> {
            validate(&Description {
                states: &self.states,
                input_alphabet: &self.input,
                tape_alphabet: &self.tape,
                initial_state: &self.initial,
            })
        }
    }

    #[test]
    fn test_valid_description() {
        assert_eq!(Fixture::valid().check(), Ok(()));
    }

    #[test]
    fn test_input_not_subset_of_tape() {
        let mut fixture = Fixture::valid();
        fixture.input.push("c".to_string());

        assert_eq!(
            fixture.check(),
            Err(ConfigurationError::NotSubset("c".to_string()))
        );
    }

    #[test]
    fn test_missing_blank() {
        let mut fixture = Fixture::valid();
        fixture.tape = strings(&["a", "b"]);

        assert_eq!(fixture.check(), Err(ConfigurationError::MissingBlank));
    }

    #[test]
    fn test_blank_in_input() {
        let mut fixture = Fixture::valid();
        fixture.input.push(String::new());

        assert_eq!(fixture.check(), Err(ConfigurationError::BlankInInput));
    }

    #[test]
    fn test_missing_special_states() {
        let mut fixture = Fixture::valid();
        fixture.states = strings(&["q0", "accept"]);
        assert_eq!(
            fixture.check(),
            Err(ConfigurationError::MissingSpecialStates(strings(&["reject"])))
        );

        fixture.states = strings(&["q0"]);
        assert_eq!(
            fixture.check(),
            Err(ConfigurationError::MissingSpecialStates(strings(&[
                "accept", "reject"
            ])))
        );
    }

    #[test]
    fn test_special_initial_state() {
        let mut fixture = Fixture::valid();
        fixture.initial = "reject".to_string();

        assert_eq!(
            fixture.check(),
            Err(ConfigurationError::SpecialInitialState("reject".to_string()))
        );
    }

    #[test]
    fn test_unknown_initial_state() {
        let mut fixture = Fixture::valid();
        fixture.initial = "q9".to_string();

        assert_eq!(
            fixture.check(),
            Err(ConfigurationError::UnknownInitialState("q9".to_string()))
        );
    }

    #[test]
    fn test_first_failure_is_reported() {
        // Missing blank and missing special states at once.
        let mut fixture = Fixture::valid();
        fixture.tape = strings(&["a", "b"]);
        fixture.states = strings(&["q0"]);

        assert_eq!(fixture.check(), Err(ConfigurationError::MissingBlank));
    }
}
