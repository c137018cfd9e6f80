//! Finite state machine descriptions: parsing, epsilon rule elimination,
//! determinization and string acceptance.
//!
//! ```
//! use dka::automaton::Automaton;
//!
//! let nfa = Automaton::parse("({q0,q1,q2},{'a'},{q0 '' -> q1, q1 'a' -> q2},q0,{q2})").unwrap();
//! let dfa = nfa.remove_epsilon().determinize();
//! assert_eq!(dfa.accepts("a"), Ok(true));
//! println!("{dfa}");
//! ```

pub mod automaton;
pub mod cli;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn dka(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    let submodule = PyModule::new(py, "automaton")?;
    automaton::automaton(&submodule)?;

    // Register in sys.modules so `import dka.automaton` works
    py.import("sys")?
        .getattr("modules")?
        .set_item("dka.automaton", &submodule)?;
    m.add_submodule(&submodule)
}
