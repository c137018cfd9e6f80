//! The validated automaton and its canonical text form.

use crate::automaton::error::{Error, InputError, SemanticError};
use crate::automaton::parser::{self, Description};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, SymbolId, escape, is_epsilon};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// A rule at name level: (origin, symbol, target). `None` is epsilon.
pub type Rule<'a> = (&'a str, Option<char>, &'a str);

type Canonical<'a> = (
    BTreeSet<&'a str>,
    BTreeSet<char>,
    Vec<Rule<'a>>,
    &'a str,
    BTreeSet<&'a str>,
);

/// A finite automaton whose sections have been checked against each other.
///
/// States and symbols are referred to by dense ids internally; names only
/// matter when parsing and serializing. Equality is structural over names.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// State names, indexed by `StateId`
    pub(super) states: Vec<String>,
    /// Alphabet, indexed by `SymbolId`
    pub(super) alphabet: IndexSet<char>,
    /// Rules: (origin, symbol) -> targets. Epsilon rules use `EPSILON`.
    pub(super) transitions: HashMap<(StateId, SymbolId), StateSet>,
    pub(super) initial_state: StateId,
    pub(super) final_states: StateSet,
}

impl Automaton {
    /// Parse and validate a description.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let description = parser::parse(text)?;
        Ok(Self::from_description(description)?)
    }

    /// Check a parsed description for cross-reference errors and build the
    /// automaton. Duplicate states, symbols and rules collapse.
    pub fn from_description(description: Description) -> Result<Self, SemanticError> {
        if description.alphabet.is_empty() {
            return Err(SemanticError::EmptyAlphabet);
        }

        let mut state_ids: IndexMap<String, StateId> = IndexMap::new();
        for name in description.states {
            let next = state_ids.len() as StateId;
            state_ids.entry(name).or_insert(next);
        }
        let alphabet: IndexSet<char> = description.alphabet.into_iter().collect();
        let num_states = state_ids.len();

        let mut transitions: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
        for rule in description.rules {
            let origin = *state_ids
                .get(&rule.origin)
                .ok_or(SemanticError::UnknownRuleOrigin(rule.origin))?;
            let symbol = match rule.symbol {
                None => EPSILON,
                Some(c) => alphabet
                    .get_index_of(&c)
                    .ok_or(SemanticError::UnknownRuleSymbol(c))? as SymbolId,
            };
            let target = *state_ids
                .get(&rule.target)
                .ok_or(SemanticError::UnknownRuleTarget(rule.target))?;
            transitions
                .entry((origin, symbol))
                .or_insert_with(|| StateSet::with_capacity(num_states))
                .insert(target);
        }

        let initial_state = *state_ids
            .get(&description.initial)
            .ok_or(SemanticError::UnknownInitialState(description.initial))?;

        let mut final_states = StateSet::with_capacity(num_states);
        for name in description.finals {
            let state = *state_ids
                .get(&name)
                .ok_or(SemanticError::UnknownFinalState(name))?;
            final_states.insert(state);
        }

        Ok(Self {
            states: state_ids.into_keys().collect(),
            alphabet,
            transitions,
            initial_state,
            final_states,
        })
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// State names in id order.
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(String::as_str)
    }

    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.states.get(state as usize).map(String::as_str)
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|s| s == name)
            .map(|i| i as StateId)
    }

    /// Alphabet symbols in id order.
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied()
    }

    pub fn symbol_id(&self, symbol: char) -> Option<SymbolId> {
        self.alphabet.get_index_of(&symbol).map(|i| i as SymbolId)
    }

    pub fn initial_state(&self) -> &str {
        &self.states[self.initial_state as usize]
    }

    pub fn initial_state_id(&self) -> StateId {
        self.initial_state
    }

    /// Final state names in id order.
    pub fn final_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.final_states
            .iter()
            .map(|state| self.states[state as usize].as_str())
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Targets of the rules leaving `state` on `symbol`.
    pub fn targets(&self, state: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    /// All rules as id triples, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    fn symbol(&self, symbol: SymbolId) -> Option<char> {
        if is_epsilon(symbol) {
            None
        } else {
            self.alphabet.get_index(symbol as usize).copied()
        }
    }

    /// All rules at name level, sorted by (origin, symbol, target) with
    /// epsilon before every symbol.
    pub fn rules(&self) -> Vec<Rule<'_>> {
        let mut rules: Vec<Rule<'_>> = self
            .transitions()
            .map(|(src, sym, dst)| {
                (
                    self.states[src as usize].as_str(),
                    self.symbol(sym),
                    self.states[dst as usize].as_str(),
                )
            })
            .collect();
        rules.sort_unstable();
        rules
    }

    /// Epsilon-free with at most one target per (state, symbol).
    pub fn is_deterministic(&self) -> bool {
        self.transitions
            .iter()
            .all(|(&(_, symbol), targets)| !is_epsilon(symbol) && targets.len() <= 1)
    }

    /// Run the automaton on `input`.
    ///
    /// Every path is followed at once, epsilon rules included, so the answer
    /// is the same before and after `remove_epsilon` and `determinize`. Fails
    /// if `input` holds a character outside the alphabet, even when the run
    /// would have stopped before reaching it.
    pub fn accepts(&self, input: &str) -> Result<bool, InputError> {
        let symbols = input
            .chars()
            .map(|c| self.symbol_id(c).ok_or(InputError::UnknownSymbol(c)))
            .collect::<Result<Vec<_>, _>>()?;

        let start = StateSet::singleton(self.initial_state, self.num_states());
        let mut current = self.epsilon_closure_of(&start);

        for symbol in symbols {
            if current.is_empty() {
                return Ok(false);
            }
            let reached = self.move_on_symbol(&current, symbol);
            current = self.epsilon_closure_of(&reached);
        }

        Ok(current.intersects(&self.final_states))
    }

    /// Name-level view used for structural equality.
    fn canonical(&self) -> Canonical<'_> {
        let mut rules = self.rules();
        rules.dedup();
        (
            self.states().collect(),
            self.alphabet().collect(),
            rules,
            self.initial_state(),
            self.final_states().collect(),
        )
    }
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Automaton {}

impl FromStr for Automaton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Automaton {
    /// Canonical description: sections sorted, one rule per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&str> = self.states().collect();
        states.sort_unstable();
        let mut alphabet: Vec<char> = self.alphabet().collect();
        alphabet.sort_unstable();
        let mut finals: Vec<&str> = self.final_states().collect();
        finals.sort_unstable();

        let alphabet: Vec<String> = alphabet
            .into_iter()
            .map(|symbol| format!("'{}'", escape(Some(symbol))))
            .collect();
        let rules: Vec<String> = self
            .rules()
            .into_iter()
            .map(|(origin, symbol, target)| format!("{origin} '{}' -> {target}", escape(symbol)))
            .collect();

        writeln!(f, "(")?;
        writeln!(f, "{{{}}},", states.join(", "))?;
        writeln!(f, "{{{}}},", alphabet.join(", "))?;
        writeln!(f, "{{")?;
        if !rules.is_empty() {
            writeln!(f, "{}", rules.join(",\n"))?;
        }
        writeln!(f, "}},")?;
        writeln!(f, "{},", self.initial_state())?;
        writeln!(f, "{{{}}}", finals.join(", "))?;
        write!(f, ")")
    }
}
