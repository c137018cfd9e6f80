//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dka")]
#[command(about = "Validate, remove epsilon rules from and determinize finite state machines")]
#[command(version)]
pub struct Cli {
    /// Read the description from FILE instead of standard input
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the result to FILE instead of standard output
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Remove epsilon rules
    #[arg(short = 'e', long, conflicts_with_all = ["determinization", "analyze_string"])]
    pub no_epsilon_rules: bool,

    /// Remove epsilon rules and determinize
    #[arg(short = 'd', long, conflicts_with = "analyze_string")]
    pub determinization: bool,

    /// Lower-case the description (and the analyzed string) before parsing
    #[arg(short = 'i', long, visible_alias = "insensitive")]
    pub case_insensitive: bool,

    /// Print 1 if the determinized automaton accepts STRING, 0 otherwise
    #[arg(long, value_name = "STRING")]
    pub analyze_string: Option<String>,
}

/// What to do with a validated automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print the automaton in canonical form
    Validate,
    RemoveEpsilon,
    /// Remove epsilon rules, then determinize
    Determinize,
    /// Remove epsilon rules, determinize and run on the string
    Analyze(String),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if let Some(input) = &self.analyze_string {
            Mode::Analyze(input.clone())
        } else if self.determinization {
            Mode::Determinize
        } else if self.no_epsilon_rules {
            Mode::RemoveEpsilon
        } else {
            Mode::Validate
        }
    }
}
