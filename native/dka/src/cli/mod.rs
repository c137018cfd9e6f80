//! Command-line front end: input loading, mode orchestration and output.

pub mod args;

pub use args::{Cli, Mode};

use crate::automaton::{self, Automaton};
use log::debug;
use std::fs;
use std::io::{self, Read, Write};
use thiserror::Error;

/// Failure of a CLI run, carrying the process exit status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("can't read input: {0}")]
    Input(#[source] io::Error),

    #[error("can't write output: {0}")]
    Output(#[source] io::Error),

    #[error(transparent)]
    Automaton(#[from] automaton::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(_) => 2,
            CliError::Output(_) => 3,
            CliError::Automaton(automaton::Error::Parse(_)) => 40,
            CliError::Automaton(automaton::Error::Semantic(_)) => 41,
            CliError::Automaton(automaton::Error::Input(_)) => 1,
        }
    }
}

/// Exit status for malformed or conflicting arguments.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Read the description from `--input` or standard input.
pub fn read_input(cli: &Cli) -> Result<String, CliError> {
    match &cli.input {
        Some(path) => fs::read_to_string(path).map_err(CliError::Input),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::Input)?;
            Ok(text)
        }
    }
}

/// Write the result to `--output` as is, or to standard output followed by a
/// newline.
pub fn write_output(cli: &Cli, result: &str) -> Result<(), CliError> {
    match &cli.output {
        Some(path) => fs::write(path, result).map_err(CliError::Output),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{result}").map_err(CliError::Output)
        }
    }
}

/// Apply `mode` to description text and render the result.
pub fn process(mode: &Mode, text: &str, case_insensitive: bool) -> Result<String, CliError> {
    let text = if case_insensitive {
        text.to_lowercase()
    } else {
        text.to_owned()
    };
    let automaton = Automaton::parse(&text)?;
    debug!("running {mode:?}");

    let result = match mode {
        Mode::Validate => automaton.to_string(),
        Mode::RemoveEpsilon => automaton.remove_epsilon().to_string(),
        Mode::Determinize => automaton.remove_epsilon().determinize().to_string(),
        Mode::Analyze(input) => {
            let input = if case_insensitive {
                input.to_lowercase()
            } else {
                input.clone()
            };
            let dfa = automaton.remove_epsilon().determinize();
            let accepted = dfa.accepts(&input).map_err(automaton::Error::from)?;
            String::from(if accepted { "1" } else { "0" })
        }
    };

    Ok(result)
}

/// Read, process and write according to the parsed arguments.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let text = read_input(cli)?;
    let result = process(&cli.mode(), &text, cli.case_insensitive)?;
    write_output(cli, &result)
}
