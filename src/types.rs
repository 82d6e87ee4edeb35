//! This module defines the core data structures and types used throughout the Turing Machine
//! engine: symbols, head directions, state classification, transitions, run outcomes and
//! error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tape symbol. The empty string is the blank symbol.
pub type Symbol = String;

/// The blank symbol. It must belong to the tape alphabet and never to the input alphabet.
pub const BLANK: &str = "";
/// How the blank symbol is rendered in traces.
pub const BLANK_DISPLAY: &str = "\u{0394}";
/// The reserved accepting state.
pub const ACCEPT: &str = "accept";
/// The reserved rejecting state.
pub const REJECT: &str = "reject";
/// Both reserved terminal states. No transition is ever evaluated from them.
pub const SPECIAL_STATES: [&str; 2] = [ACCEPT, REJECT];

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Keep the head in the same position.
    Stay,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Head displacement for this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Stay => 0,
            Direction::Right => 1,
        }
    }
}

/// Classification of a state label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Accept,
    Reject,
    /// Any non-special state. Transitions are evaluated from these.
    Working,
}

impl StateKind {
    pub fn of(state: &str) -> Self {
        match state {
            ACCEPT => StateKind::Accept,
            REJECT => StateKind::Reject,
            _ => StateKind::Working,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != StateKind::Working
    }
}

/// The result of applying the transition function to `(state, symbol)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the machine moves into.
    pub next_state: String,
    /// The symbol written over the one just read.
    pub write: Symbol,
    /// Where the head moves after writing.
    pub direction: Direction,
}

impl Transition {
    pub fn new(next_state: impl Into<String>, write: impl Into<Symbol>, direction: Direction) -> Self {
        Self {
            next_state: next_state.into(),
            write: write.into(),
            direction,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Halted in `accept`.
    Accepted,
    /// Halted in `reject`.
    Rejected,
    /// The head moved left of cell 0.
    Crashed,
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and is still in a working state.
    Continue,
    /// The machine has reached a terminal configuration.
    Halt(Outcome),
}

/// The complete result of running a machine to termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// The final state label. On a crash this is the state the crashing transition moved into.
    pub state: String,
    pub outcome: Outcome,
    /// Number of transitions applied.
    pub steps: usize,
    /// Final tape contents.
    pub tape: Vec<Symbol>,
    /// Final head position. On a crash, the cell the head tried to leave.
    pub head: usize,
}

/// Consistency failures detected when a machine is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Input alphabet must be subset of tape alphabet: {0:?} is missing")]
    NotSubset(Symbol),
    #[error("Tape alphabet must include the blank symbol")]
    MissingBlank,
    #[error("Input alphabet must not include the blank symbol")]
    BlankInInput,
    #[error("States must include {:?}, missing {0:?}", SPECIAL_STATES)]
    MissingSpecialStates(Vec<String>),
    #[error("Initial state cannot be a special state: {0}")]
    SpecialInitialState(String),
    #[error("Initial state {0} is not in the state set")]
    UnknownInitialState(String),
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// The machine description failed validation.
    #[error("Invalid machine description: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The input sequence contains a symbol outside the input alphabet.
    #[error("Invalid input, unexpected symbol {symbol:?} at position {position}")]
    InvalidInput { symbol: Symbol, position: usize },
    /// The transition function has no rule for a pairing.
    #[error("No rule defined for state {0} and symbol {1:?}")]
    UndefinedTransition(String, Symbol),
    /// No built-in program with this name.
    #[error("Program '{0}' not found")]
    ProgramNotFound(String),
}
