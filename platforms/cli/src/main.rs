use anyhow::{Context, Result};
use clap::Parser;
use tmsim::{ConsoleObserver, Execution, NoopObserver, Observer, ProgramManager, Recorder};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Name of the built-in program to run
    #[clap(short, long, default_value = "contains-aa")]
    program: String,

    /// Comma-separated input symbols, e.g. `b,b,a,b,a,a`. Omit for an empty input.
    #[clap(short, long, default_value = "")]
    input: String,

    /// Print each step of the execution to stderr
    #[clap(short, long, conflicts_with = "json")]
    trace: bool,

    /// Print the recorded trace as JSON. The whole trace is held in memory until the run ends.
    #[clap(long)]
    json: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "tmsim=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        for (index, name) in ProgramManager::list_program_names().iter().enumerate() {
            let info = ProgramManager::get_program_info(index)?;
            println!("{:<12} {}", name, info.description);
        }
        return Ok(());
    }

    let input = parse_symbols(&cli.input);

    let mut recorder = Recorder::new();
    let mut console = ConsoleObserver::stderr();
    let mut noop = NoopObserver;
    let observer: &mut dyn Observer = if cli.json {
        &mut recorder
    } else if cli.trace {
        &mut console
    } else {
        &mut noop
    };

    let execution = run_program(&cli.program, &input, observer)?;

    if cli.json {
        println!("{}", recorder.to_json()?);
    }
    println!("{}", execution.state);

    Ok(())
}

/// Builds the named program and runs it to completion.
fn run_program(name: &str, input: &[String], observer: &mut dyn Observer) -> Result<Execution> {
    let program = ProgramManager::get_program_by_name(name)?;
    let machine = program
        .build()
        .with_context(|| format!("Failed to build program '{}'", program.name))?;

    tracing::info!(program = program.name, symbols = input.len(), "starting run");
    let execution = match machine.execute(input, observer) {
        Ok(execution) => execution,
        Err(e) => {
            tracing::error!(program = program.name, error = %e, "run failed");
            return Err(e.into());
        }
    };
    tracing::info!(outcome = ?execution.outcome, steps = execution.steps, "run finished");

    Ok(execution)
}

/// Splits a comma-separated symbol list. The empty string is the empty input.
fn parse_symbols(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }

    input.split(',').map(|symbol| symbol.trim().to_string()).collect()
}
