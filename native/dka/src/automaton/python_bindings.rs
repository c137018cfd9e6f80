//! PyO3 bindings for the automaton module.

use crate::automaton::error::Error;
use crate::automaton::model::Automaton;
use pyo3::create_exception;
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

create_exception!(automaton, ParseError, PyValueError, "Malformed FSM description.");
create_exception!(automaton, SemanticError, PyValueError, "Inconsistent FSM description.");
create_exception!(automaton, InputError, PyValueError, "Symbol outside the alphabet.");

fn to_py_err(err: Error) -> PyErr {
    let message = err.to_string();
    match err {
        Error::Parse(_) => ParseError::new_err(message),
        Error::Semantic(_) => SemanticError::new_err(message),
        Error::Input(_) => InputError::new_err(message),
    }
}

/// A validated finite automaton.
#[pyclass(name = "Automaton", module = "dka.automaton", frozen, eq)]
#[derive(Clone, PartialEq)]
pub struct PyAutomaton {
    inner: Automaton,
}

#[pymethods]
impl PyAutomaton {
    /// Parse and validate a description.
    #[new]
    fn new(description: &str) -> PyResult<Self> {
        let inner = Automaton::parse(description).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Return an equivalent automaton without epsilon rules.
    fn remove_epsilon(&self) -> Self {
        Self {
            inner: self.inner.remove_epsilon(),
        }
    }

    /// Return an equivalent deterministic automaton.
    /// Epsilon rules are ignored; call `remove_epsilon` first.
    fn determinize(&self) -> Self {
        Self {
            inner: self.inner.determinize(),
        }
    }

    fn accepts(&self, input: &str) -> PyResult<bool> {
        self.inner
            .accepts(input)
            .map_err(|e| to_py_err(e.into()))
    }

    /// Names of the states in the epsilon closure of `state`.
    fn epsilon_closure(&self, state: &str) -> PyResult<Vec<String>> {
        let id = self
            .inner
            .state_id(state)
            .ok_or_else(|| PyKeyError::new_err(state.to_owned()))?;
        let mut names: Vec<String> = self
            .inner
            .epsilon_closure(id)
            .iter()
            .filter_map(|s| self.inner.state_name(s).map(str::to_owned))
            .collect();
        names.sort();
        Ok(names)
    }

    fn is_deterministic(&self) -> bool {
        self.inner.is_deterministic()
    }

    #[getter]
    fn states(&self) -> Vec<String> {
        self.inner.states().map(str::to_owned).collect()
    }

    #[getter]
    fn alphabet(&self) -> Vec<char> {
        self.inner.alphabet().collect()
    }

    #[getter]
    fn initial_state(&self) -> String {
        self.inner.initial_state().to_owned()
    }

    #[getter]
    fn final_states(&self) -> Vec<String> {
        self.inner.final_states().map(str::to_owned).collect()
    }

    /// Rules as `(origin, symbol, target)` tuples; `symbol` is `None` for
    /// epsilon rules.
    #[getter]
    fn rules(&self) -> Vec<(String, Option<char>, String)> {
        self.inner
            .rules()
            .into_iter()
            .map(|(origin, symbol, target)| (origin.to_owned(), symbol, target.to_owned()))
            .collect()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, symbols={}, rules={})",
            self.inner.num_states(),
            self.inner.alphabet().count(),
            self.inner.transitions().count()
        )
    }
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_class::<PyAutomaton>()?;
    m.add("ParseError", py.get_type::<ParseError>())?;
    m.add("SemanticError", py.get_type::<SemanticError>())?;
    m.add("InputError", py.get_type::<InputError>())?;
    Ok(())
}
