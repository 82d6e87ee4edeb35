//! Step-by-step observation of a run.
//!
//! An [`Observer`] is handed one [`StepEvent`] before each transition is applied, and a crash
//! notice if the head falls off the left end of the tape. Observers are diagnostic only, they
//! cannot influence the result of a run.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::types::{Direction, Symbol, BLANK, BLANK_DISPLAY};

/// Everything known about a step before its transition is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Zero-based step index.
    pub step: usize,
    /// The state the transition is evaluated from.
    pub state: String,
    /// Tape contents before the write. Taken after the tape has been extended to the head, so
    /// `tape[head]` is always the cell being read.
    pub tape: Vec<Symbol>,
    pub head: usize,
    pub read: Symbol,
    pub write: Symbol,
    pub next_state: String,
    pub direction: Direction,
}

/// A trace sink.
pub trait Observer {
    fn on_step(&mut self, event: &StepEvent);

    /// Called once when the head moves left of cell 0. `state` is the state just entered.
    fn on_crash(&mut self, state: &str);

    /// When false the engine skips building step events for this observer.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn is_enabled(&self) -> bool {
        false
    }

    fn on_step(&mut self, _event: &StepEvent) {}

    fn on_crash(&mut self, _state: &str) {}
}

/// Renders a tape as a `|`-separated line plus a caret line pointing at the head cell.
///
/// The blank symbol is shown as `Δ`. A head beyond the end of the tape points one cell past the
/// last symbol.
pub fn render_tape(tape: &[Symbol], head: usize) -> (String, String) {
    const SEPARATOR: &str = "|";

    let cells: Vec<&str> = tape
        .iter()
        .map(|symbol| {
            if symbol == BLANK {
                BLANK_DISPLAY
            } else {
                symbol.as_str()
            }
        })
        .collect();

    let offset: usize = cells
        .iter()
        .take(head)
        .map(|cell| cell.chars().count())
        .sum::<usize>()
        + head * SEPARATOR.len();

    (cells.join(SEPARATOR), format!("{}^", " ".repeat(offset)))
}

/// Human-readable trace written to any `io::Write`.
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl ConsoleObserver<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_step(&mut self, event: &StepEvent) -> io::Result<()> {
        let (tape, caret) = render_tape(&event.tape, event.head);

        writeln!(self.out, "{}", "#".repeat(20))?;
        writeln!(self.out, "State: {}", event.state)?;
        writeln!(self.out, "{}", tape)?;
        writeln!(self.out, "{}", caret)?;
        writeln!(self.out, "Replace symbol: {}", event.write)?;
        writeln!(self.out, "New state: {}", event.next_state)
    }
}

impl<W: Write> Observer for ConsoleObserver<W> {
    fn on_step(&mut self, event: &StepEvent) {
        if let Err(e) = self.write_step(event) {
            tracing::warn!(error = %e, "failed to write trace");
        }
    }

    fn on_crash(&mut self, _state: &str) {
        if let Err(e) = writeln!(self.out, "Tape head crashed") {
            tracing::warn!(error = %e, "failed to write trace");
        }
    }
}

/// A recorded trace entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TraceEvent {
    Step(StepEvent),
    Crash { state: String },
}

/// Observer that keeps every event in memory.
///
/// Each step stores a full copy of the tape, so memory grows with steps times tape length and
/// never stops growing for a machine that does not halt.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<TraceEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Only the step events, in order.
    pub fn steps(&self) -> impl Iterator<Item = &StepEvent> {
        self.events.iter().filter_map(|event| match event {
            TraceEvent::Step(step) => Some(step),
            TraceEvent::Crash { .. } => None,
        })
    }

    pub fn crashed(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, TraceEvent::Crash { .. }))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl Observer for Recorder {
    fn on_step(&mut self, event: &StepEvent) {
        self.events.push(TraceEvent::Step(event.clone()));
    }

    fn on_crash(&mut self, state: &str) {
        self.events.push(TraceEvent::Crash {
            state: state.to_string(),
        });
    }
}
