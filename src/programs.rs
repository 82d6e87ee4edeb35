use crate::delta::TransitionTable;
use crate::machine::TuringMachine;
use crate::types::{ConfigurationError, Direction, Transition, TuringMachineError, BLANK};

/// A named example machine that can be built on demand.
#[derive(Debug, Clone, Copy)]
pub struct Program {
    pub name: &'static str,
    pub description: &'static str,
    builder: fn() -> Result<TuringMachine, ConfigurationError>,
}

impl Program {
    pub fn build(&self) -> Result<TuringMachine, ConfigurationError> {
        (self.builder)()
    }
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = vec![
        Program {
            name: "contains-aa",
            description: "Accepts strings over {a, b} containing the substring \"aa\"",
            builder: contains_aa,
        },
        Program {
            name: "ends-with-b",
            description: "Accepts strings over {a, b} whose last symbol is b",
            builder: ends_with_b,
        },
        Program {
            name: "left-crash",
            description: "Moves left off the leading blank cell and crashes in q1",
            builder: left_crash,
        },
    ];
}

const AB_STATES: [&str; 5] = ["accept", "reject", "q0", "q1", "q2"];
const AB_INPUT: [&str; 2] = ["a", "b"];
const AB_TAPE: [&str; 3] = ["a", "b", BLANK];

fn contains_aa_delta(state: &str, symbol: &str) -> Transition {
    match (state, symbol) {
        ("q0", BLANK) => Transition::new("q1", BLANK, Direction::Right),
        ("q1", "b") | ("q2", "b") => Transition::new("q1", "b", Direction::Right),
        ("q1", "a") => Transition::new("q2", "a", Direction::Right),
        ("q2", "a") => Transition::new("accept", "a", Direction::Right),
        _ => Transition::new("reject", symbol, Direction::Stay),
    }
}

fn contains_aa() -> Result<TuringMachine, ConfigurationError> {
    TuringMachine::new(&AB_STATES, &AB_INPUT, &AB_TAPE, "q0", contains_aa_delta)
}

fn ends_with_b() -> Result<TuringMachine, ConfigurationError> {
    let table = TransitionTable::new()
        .rule("q0", BLANK, "q1", BLANK, Direction::Right)
        .rule("q1", "a", "q1", "a", Direction::Right)
        .rule("q1", "b", "q1", "b", Direction::Right)
        .rule("q1", BLANK, "q2", BLANK, Direction::Left)
        .rule("q2", "b", "accept", "b", Direction::Stay)
        .otherwise("reject");

    TuringMachine::new(&AB_STATES, &AB_INPUT, &AB_TAPE, "q0", table)
}

fn left_crash() -> Result<TuringMachine, ConfigurationError> {
    let table = TransitionTable::new()
        .rule("q0", BLANK, "q1", BLANK, Direction::Left)
        .otherwise("reject");

    TuringMachine::new(&AB_STATES, &AB_INPUT, &AB_TAPE, "q0", table)
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .get(index)
            .copied()
            .ok_or_else(|| TuringMachineError::ProgramNotFound(format!("#{}", index)))
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .copied()
            .ok_or_else(|| TuringMachineError::ProgramNotFound(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;
        let machine = program.build()?;

        Ok(ProgramInfo {
            index,
            name: program.name.to_string(),
            description: program.description.to_string(),
            initial_state: machine.initial_state().to_string(),
            state_count: machine.states().len(),
            input_alphabet: machine.input_alphabet().to_vec(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub initial_state: String,
    pub state_count: usize,
    pub input_alphabet: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NoopObserver;
    use crate::types::Outcome;

    fn machine(name: &str) -> TuringMachine {
        ProgramManager::get_program_by_name(name)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_all_programs_build() {
        assert_eq!(ProgramManager::get_program_count(), 3);

        for program in PROGRAMS.iter() {
            assert!(program.build().is_ok(), "{} failed to build", program.name);
        }
    }

    #[test]
    fn test_contains_aa() {
        let tm = machine("contains-aa");

        assert_eq!(tm.run(&["b", "b", "a", "b", "a", "a"]).unwrap(), "accept");
        assert_eq!(tm.run(&["b", "b", "a", "b", "a"]).unwrap(), "reject");
        assert_eq!(tm.run::<&str>(&[]).unwrap(), "reject");
    }

    #[test]
    fn test_ends_with_b() {
        let tm = machine("ends-with-b");

        assert_eq!(tm.run(&["a", "b"]).unwrap(), "accept");
        assert_eq!(tm.run(&["b", "a"]).unwrap(), "reject");
        assert_eq!(tm.run(&["b"]).unwrap(), "accept");
        // Steps back onto the leading blank without falling off.
        let execution = tm.execute::<&str>(&[], &mut NoopObserver).unwrap();
        assert_eq!(execution.outcome, Outcome::Rejected);
    }

    #[test]
    fn test_left_crash() {
        let tm = machine("left-crash");

        let execution = tm.execute(&["a", "b"], &mut NoopObserver).unwrap();
        assert_eq!(execution.outcome, Outcome::Crashed);
        assert_eq!(execution.state, "q1");
        assert_eq!(tm.run(&["a"]).unwrap(), "q1");
    }

    #[test]
    fn test_get_program_by_index() {
        let program = ProgramManager::get_program_by_index(1).unwrap();
        assert_eq!(program.name, "ends-with-b");

        assert!(matches!(
            ProgramManager::get_program_by_index(99),
            Err(TuringMachineError::ProgramNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_program_name() {
        assert_eq!(
            ProgramManager::get_program_by_name("busy-beaver").unwrap_err(),
            TuringMachineError::ProgramNotFound("busy-beaver".to_string())
        );
    }

    #[test]
    fn test_list_and_search() {
        assert_eq!(
            ProgramManager::list_program_names(),
            vec!["contains-aa", "ends-with-b", "left-crash"]
        );
        assert_eq!(ProgramManager::search_programs("CRASH"), vec![2]);
        assert!(ProgramManager::search_programs("nothing").is_empty());
    }

    #[test]
    fn test_program_info() {
        let info = ProgramManager::get_program_info(0).unwrap();

        assert_eq!(info.name, "contains-aa");
        assert_eq!(info.initial_state, "q0");
        assert_eq!(info.state_count, 5);
        assert_eq!(info.input_alphabet, vec!["a", "b"]);
    }
}
