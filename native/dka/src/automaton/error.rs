//! Error types for parsing, validating and querying automata.

use std::fmt;
use thiserror::Error;

/// Section of a description an offending token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    States,
    Alphabet,
    Rules,
    Initial,
    Final,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::States => "states",
            Section::Alphabet => "alphabet",
            Section::Rules => "rules",
            Section::Initial => "initial state",
            Section::Final => "final states",
        })
    }
}

/// Grammar or lexical violation in a description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not wrapped in `({` ... `})`.
    #[error("description is not enclosed in '({{' and '}})'")]
    MissingEnvelope,

    /// The body does not split into states, alphabet, rules, initial and final
    /// sections.
    #[error("expected 5 sections, found {0}")]
    SectionCount(usize),

    /// A quoted literal is opened but never closed.
    #[error("unterminated symbol literal at offset {0}")]
    UnterminatedLiteral(usize),

    #[error("state set is empty")]
    EmptyStates,

    #[error("invalid identifier '{token}' in {section}")]
    InvalidIdentifier { section: Section, token: String },

    #[error("invalid symbol '{token}' in {section}")]
    InvalidSymbol { section: Section, token: String },

    /// A rule that is not of the form `origin'symbol'->target`.
    #[error("malformed rule '{0}'")]
    MalformedRule(String),
}

/// Cross-reference violation between the sections of a description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("alphabet is empty")]
    EmptyAlphabet,

    #[error("rule origin '{0}' is not in the state set")]
    UnknownRuleOrigin(String),

    #[error("rule symbol '{0}' is not in the alphabet")]
    UnknownRuleSymbol(char),

    #[error("rule target '{0}' is not in the state set")]
    UnknownRuleTarget(String),

    #[error("initial state '{0}' is not in the state set")]
    UnknownInitialState(String),

    #[error("final state '{0}' is not in the state set")]
    UnknownFinalState(String),
}

/// Invalid input to an acceptance query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("symbol '{0}' is not in the alphabet")]
    UnknownSymbol(char),
}

/// Any error produced by the automaton core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("input error: {0}")]
    Input(#[from] InputError),
}

/// A specialized `Result` type for automaton operations.
pub type Result<T> = std::result::Result<T, Error>;
