//! The transition function collaborator.
//!
//! The engine never inspects a transition function, it only invokes it. Anything implementing
//! [`Delta`] can drive a machine: plain functions and closures with the signature
//! `(&str, &str) -> Transition`, or a [`TransitionTable`] assembled in code.

use std::collections::HashMap;

use crate::types::{Direction, Symbol, Transition, TuringMachineError};

/// A transition function `(state, symbol) -> (next state, symbol to write, direction)`.
///
/// Implementations must be total over every `(working state, tape symbol)` pair a run can
/// reach. Any error returned here is propagated to the caller of the run unchanged.
pub trait Delta: Send + Sync {
    fn delta(&self, state: &str, symbol: &str) -> Result<Transition, TuringMachineError>;
}

impl<F> Delta for F
where
    F: Fn(&str, &str) -> Transition + Send + Sync,
{
    fn delta(&self, state: &str, symbol: &str) -> Result<Transition, TuringMachineError> {
        Ok(self(state, symbol))
    }
}

/// A table-driven transition function.
///
/// Pairings missing from the table fall through to the catch-all state set by
/// [`TransitionTable::otherwise`], which writes the read symbol back and keeps the head still.
/// Without a catch-all a missing pairing is an [`TuringMachineError::UndefinedTransition`].
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rules: HashMap<(String, Symbol), Transition>,
    fallback: Option<String>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the rule `(state, read) -> (next_state, write, direction)`, replacing any earlier
    /// rule for the same pairing.
    pub fn rule(
        mut self,
        state: &str,
        read: &str,
        next_state: &str,
        write: &str,
        direction: Direction,
    ) -> Self {
        self.rules.insert(
            (state.to_string(), read.to_string()),
            Transition::new(next_state, write, direction),
        );
        self
    }

    /// Routes every unlisted pairing to `state`.
    pub fn otherwise(mut self, state: &str) -> Self {
        self.fallback = Some(state.to_string());
        self
    }

    /// Number of explicit rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up the explicit rule for a pairing, ignoring the catch-all.
    pub fn get(&self, state: &str, symbol: &str) -> Option<&Transition> {
        self.rules.get(&(state.to_string(), symbol.to_string()))
    }
}

impl Delta for TransitionTable {
    fn delta(&self, state: &str, symbol: &str) -> Result<Transition, TuringMachineError> {
        if let Some(transition) = self.get(state, symbol) {
            return Ok(transition.clone());
        }

        match &self.fallback {
            Some(next_state) => Ok(Transition::new(next_state.as_str(), symbol, Direction::Stay)),
            None => Err(TuringMachineError::UndefinedTransition(
                state.to_string(),
                symbol.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLANK;

    #[test]
    fn test_function_as_delta() {
        fn always_accept(_state: &str, symbol: &str) -> Transition {
            Transition::new("accept", symbol, Direction::Stay)
        }

        let delta: &dyn Delta = &always_accept;
        assert_eq!(
            delta.delta("q0", "a").unwrap(),
            Transition::new("accept", "a", Direction::Stay)
        );
    }

    #[test]
    fn test_closure_as_delta() {
        let marker = "x".to_string();
        let closure = move |_state: &str, _symbol: &str| {
            Transition::new("reject", marker.as_str(), Direction::Right)
        };

        let transition = closure.delta("q0", BLANK).unwrap();
        assert_eq!(transition.write, "x");
        assert_eq!(transition.direction, Direction::Right);
    }

    #[test]
    fn test_table_lookup() {
        let table = TransitionTable::new()
            .rule("q0", BLANK, "q1", BLANK, Direction::Right)
            .rule("q1", "a", "accept", "a", Direction::Right);

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.delta("q1", "a").unwrap(),
            Transition::new("accept", "a", Direction::Right)
        );
    }

    #[test]
    fn test_table_later_rule_wins() {
        let table = TransitionTable::new()
            .rule("q0", "a", "q1", "a", Direction::Right)
            .rule("q0", "a", "q2", "b", Direction::Left);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("q0", "a").unwrap().next_state, "q2");
    }

    #[test]
    fn test_table_fallback() {
        let table = TransitionTable::new()
            .rule("q0", "a", "q1", "a", Direction::Right)
            .otherwise("reject");

        let transition = table.delta("q0", "b").unwrap();
        assert_eq!(transition, Transition::new("reject", "b", Direction::Stay));
    }

    #[test]
    fn test_table_undefined_transition() {
        let table = TransitionTable::new().rule("q0", "a", "q1", "a", Direction::Right);

        match table.delta("q0", "b") {
            Err(TuringMachineError::UndefinedTransition(state, symbol)) => {
                assert_eq!(state, "q0");
                assert_eq!(symbol, "b");
            }
            other => panic!("Expected UndefinedTransition, got {:?}", other),
        }
    }
}
