//! This module defines the `TuringMachine` struct, which simulates a single-tape deterministic
//! Turing Machine. The machine holds an immutable description; every run gets its own tape,
//! head and state through [`Run`].

use std::fmt;

use tracing::{debug, debug_span, info, warn};

use crate::delta::Delta;
use crate::trace::{NoopObserver, Observer, StepEvent};
use crate::types::{
    ConfigurationError, Execution, Outcome, StateKind, Step, Symbol, TuringMachineError, BLANK,
};
use crate::validate::{validate, Description};

/// A validated single-tape Turing Machine.
///
/// The description is fixed at construction. `run` takes `&self`, so one machine can serve any
/// number of independent runs, including from several threads at once.
pub struct TuringMachine {
    states: Vec<String>,
    input_alphabet: Vec<Symbol>,
    tape_alphabet: Vec<Symbol>,
    initial_state: String,
    delta: Box<dyn Delta>,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` after checking the description for consistency.
    ///
    /// # Arguments
    ///
    /// * `states` - The state set. Must contain `accept` and `reject`.
    /// * `input_alphabet` - Symbols allowed in the input. Must not contain the blank symbol.
    /// * `tape_alphabet` - Symbols allowed on the tape. Must contain the blank symbol and every
    ///   input symbol.
    /// * `initial_state` - A non-special member of `states`.
    /// * `delta` - The transition function.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` if the description is consistent.
    /// * `Err(ConfigurationError)` for the first rule the description violates.
    pub fn new(
        states: &[&str],
        input_alphabet: &[&str],
        tape_alphabet: &[&str],
        initial_state: &str,
        delta: impl Delta + 'static,
    ) -> Result<Self, ConfigurationError> {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let machine = Self {
            states: owned(states),
            input_alphabet: owned(input_alphabet),
            tape_alphabet: owned(tape_alphabet),
            initial_state: initial_state.to_string(),
            delta: Box::new(delta),
        };

        validate(&Description {
            states: &machine.states,
            input_alphabet: &machine.input_alphabet,
            tape_alphabet: &machine.tape_alphabet,
            initial_state: &machine.initial_state,
        })?;

        debug!(
            states = machine.states.len(),
            tape_symbols = machine.tape_alphabet.len(),
            initial = %machine.initial_state,
            "machine constructed"
        );

        Ok(machine)
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn input_alphabet(&self) -> &[Symbol] {
        &self.input_alphabet
    }

    pub fn tape_alphabet(&self) -> &[Symbol] {
        &self.tape_alphabet
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Prepares a run over `input` without executing any step.
    ///
    /// The tape starts as a single blank cell followed by the input, with the head on the blank.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidInput)` if a symbol is outside the input alphabet.
    pub fn start<S: AsRef<str>>(&self, input: &[S]) -> Result<Run<'_>, TuringMachineError> {
        let symbols: Vec<&str> = input.iter().map(|symbol| symbol.as_ref()).collect();

        if let Some((position, symbol)) = symbols
            .iter()
            .enumerate()
            .find(|(_, symbol)| !self.input_alphabet.iter().any(|s| s == *symbol))
        {
            return Err(TuringMachineError::InvalidInput {
                symbol: symbol.to_string(),
                position,
            });
        }

        let mut tape = Vec::with_capacity(symbols.len() + 1);
        tape.push(BLANK.to_string());
        tape.extend(symbols.iter().map(|symbol| symbol.to_string()));

        Ok(Run {
            machine: self,
            state: self.initial_state.clone(),
            tape,
            head: 0,
            step_count: 0,
            outcome: None,
        })
    }

    /// Runs the machine on `input` until it accepts, rejects or crashes, reporting every step to
    /// `observer`.
    pub fn execute<S: AsRef<str>>(
        &self,
        input: &[S],
        observer: &mut dyn Observer,
    ) -> Result<Execution, TuringMachineError> {
        let _span = debug_span!("run", initial = %self.initial_state, input_len = input.len())
            .entered();

        let mut run = self.start(input)?;
        let outcome = loop {
            if let Step::Halt(outcome) = run.step_with(observer)? {
                break outcome;
            }
        };

        Ok(Execution {
            state: run.state,
            outcome,
            steps: run.step_count,
            tape: run.tape,
            head: run.head,
        })
    }

    /// Runs the machine on `input` and returns the final state label.
    ///
    /// A crash is not an error: the label of the state the crashing transition moved into is
    /// returned, which may itself be `accept` or `reject`. Use [`TuringMachine::execute`] to
    /// tell a crash apart from an ordinary halt.
    pub fn run<S: AsRef<str>>(&self, input: &[S]) -> Result<String, TuringMachineError> {
        self.execute(input, &mut NoopObserver)
            .map(|execution| execution.state)
    }
}

impl fmt::Debug for TuringMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TuringMachine")
            .field("states", &self.states)
            .field("input_alphabet", &self.input_alphabet)
            .field("tape_alphabet", &self.tape_alphabet)
            .field("initial_state", &self.initial_state)
            .finish_non_exhaustive()
    }
}

/// The mutable configuration of a single run: tape, head position and current state.
#[derive(Debug)]
pub struct Run<'m> {
    machine: &'m TuringMachine,
    state: String,
    tape: Vec<Symbol>,
    head: usize,
    step_count: usize,
    outcome: Option<Outcome>,
}

impl Run<'_> {
    /// Executes a single step without observing it.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        self.step_with(&mut NoopObserver)
    }

    /// Executes a single step of the computation.
    ///
    /// This extends the tape if the head is past its end, reads the symbol under the head,
    /// applies the transition function, writes, changes state and moves the head.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine is still in a working state.
    /// * `Step::Halt(_)` once the machine has accepted, rejected or crashed. Further calls keep
    ///   returning the same halt without doing anything.
    /// * `Err(_)` if the transition function failed.
    pub fn step_with(&mut self, observer: &mut dyn Observer) -> Result<Step, TuringMachineError> {
        if let Some(outcome) = self.outcome {
            return Ok(Step::Halt(outcome));
        }

        // The tape is infinite to the right
        if self.head >= self.tape.len() {
            self.tape.resize(self.head + 1, BLANK.to_string());
            debug!(len = self.tape.len(), "tape extended");
        }

        let read = &self.tape[self.head];
        let transition = self.machine.delta.delta(&self.state, read)?;

        debug!(
            step = self.step_count,
            state = %self.state,
            head = self.head,
            read = %read,
            write = %transition.write,
            next = %transition.next_state,
            "transition"
        );

        if observer.is_enabled() {
            observer.on_step(&StepEvent {
                step: self.step_count,
                state: self.state.clone(),
                tape: self.tape.clone(),
                head: self.head,
                read: read.clone(),
                write: transition.write.clone(),
                next_state: transition.next_state.clone(),
                direction: transition.direction,
            });
        }

        self.tape[self.head] = transition.write;
        self.state = transition.next_state;
        self.step_count += 1;

        // The tape is not infinite to the left
        match self.head.checked_add_signed(transition.direction.offset()) {
            Some(head) => self.head = head,
            None => {
                warn!(state = %self.state, step = self.step_count, "tape head crashed");
                observer.on_crash(&self.state);
                return Ok(self.halt(Outcome::Crashed));
            }
        }

        Ok(match StateKind::of(&self.state) {
            StateKind::Accept => self.halt(Outcome::Accepted),
            StateKind::Reject => self.halt(Outcome::Rejected),
            StateKind::Working => Step::Continue,
        })
    }

    fn halt(&mut self, outcome: Outcome) -> Step {
        info!(?outcome, state = %self.state, steps = self.step_count, "machine halted");
        self.outcome = Some(outcome);
        Step::Halt(outcome)
    }

    /// Returns the current state of the run.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the tape contents. Cells past the end are blank.
    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }

    /// Returns the head position. It may equal the tape length until the next step extends it.
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_halted(&self) -> bool {
        self.outcome.is_some()
    }
}
