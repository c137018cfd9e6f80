//! Finite automaton model for textual FSM descriptions.
//!
//! This module provides:
//! - A parser and validator for the `({states}, {alphabet}, {rules}, initial, {finals})` format
//! - Epsilon closure computation and epsilon rule elimination
//! - Subset construction (NFA to DFA conversion) with canonical state names
//! - Canonical serialization back to the description format
//! - PyO3 bindings for Python interoperability (feature `python`)

mod epsilon;
mod error;
mod identifier;
mod model;
mod parser;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod subset_construction;
mod symbol;

pub use error::{Error, InputError, ParseError, Result, SemanticError, Section};
pub use identifier::{decode_symbol, is_identifier};
pub use model::{Automaton, Rule};
pub use parser::{Description, RawRule, parse};
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{EPSILON, QUOTE, SymbolId};
