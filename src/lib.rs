//! This crate provides the core logic for a single-tape deterministic Turing Machine simulator.
//! It includes modules for validating machine descriptions, executing runs step by step,
//! observing execution traces, and a small collection of predefined programs.

pub mod delta;
pub mod machine;
pub mod programs;
pub mod trace;
pub mod types;
pub mod validate;

/// Re-exports the transition function trait and the table-driven implementation.
pub use delta::{Delta, TransitionTable};
/// Re-exports the `TuringMachine` engine and its per-run state.
pub use machine::{Run, TuringMachine};
/// Re-exports `Program`, `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{Program, ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the trace sinks.
pub use trace::{ConsoleObserver, NoopObserver, Observer, Recorder, StepEvent, TraceEvent};
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    ConfigurationError, Direction, Execution, Outcome, StateKind, Step, Symbol, Transition,
    TuringMachineError, ACCEPT, BLANK, REJECT,
};
